use payloads::{BookingField, RetrieveOutcome};
use test_helpers::{assert_status_code, mock, spawn_webhook};

#[tokio::test]
async fn every_field_is_sent_as_a_text_part() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    let mut record = mock::booking_a();
    record.set_field(BookingField::StartTime, "2024-05-01T12:00")?;

    webhook.client.confirm(&record).await?;

    let confirmations = webhook.store.confirmations();
    assert_eq!(confirmations.len(), 1);
    let received = &confirmations[0];
    assert_eq!(received.len(), BookingField::ALL.len());
    for (name, value) in record.form_fields() {
        assert_eq!(received.get(name), Some(&value), "part {name}");
    }
    assert_eq!(received["activities"], r#"["Bowling"]"#);
    assert_eq!(received["numberOfPeople"], "2");
    assert_eq!(received["startTime"], "2024-05-01T12:00");
    Ok(())
}

#[tokio::test]
async fn missing_values_are_sent_empty() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;

    webhook.client.confirm(&Default::default()).await?;

    let received = &webhook.store.confirmations()[0];
    assert_eq!(received["firstName"], "");
    assert_eq!(received["numberOfPeople"], "");
    assert_eq!(received["activities"], "[]");
    Ok(())
}

#[tokio::test]
async fn failure_status_is_an_api_error() {
    let webhook = spawn_webhook().await;
    webhook.store.fail_confirmations_with(Some(500));

    assert_status_code(webhook.client.confirm(&mock::booking_a()).await, 500);
    assert!(webhook.store.confirmations().is_empty());
}

#[tokio::test]
async fn confirmed_bookings_retrieve_as_already_confirmed() -> anyhow::Result<()>
{
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    webhook.client.confirm(&mock::booking_a()).await?;
    let outcome = webhook.client.retrieve(mock::PENDING_TOKEN).await?;

    assert_eq!(outcome, RetrieveOutcome::AlreadyConfirmed);
    Ok(())
}
