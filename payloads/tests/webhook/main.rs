mod confirm;
mod retrieve;
mod session;

use test_helpers::{mock, spawn_webhook};

#[tokio::test]
async fn seeded_bookings_are_served() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    for token in [mock::PENDING_TOKEN, mock::FLAT_TOKEN, mock::CONFIRMED_TOKEN]
    {
        webhook.client.retrieve(token).await?;
    }
    assert_eq!(webhook.store.retrieve_hits(), 3);

    Ok(())
}
