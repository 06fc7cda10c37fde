use payloads::{Activity, ClientError, RetrieveOutcome};
use serde_json::json;
use test_helpers::{assert_status_code, mock, spawn_webhook};

#[tokio::test]
async fn record_nested_under_user() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    webhook.store.stage("tok", &mock::booking_a());

    let outcome = webhook.client.retrieve("tok").await?;

    let RetrieveOutcome::Record(record) = outcome else {
        panic!("expected a record, got {outcome:?}");
    };
    assert_eq!(record, mock::booking_a());
    Ok(())
}

#[tokio::test]
async fn record_at_top_level() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    webhook.store.stage_body(
        "tok",
        json!({
            "firstName": "Grace",
            "numberOfPeople": 3,
            "activities": ["Pool", "Karaoke"],
        }),
    );

    let outcome = webhook.client.retrieve("tok").await?;

    let RetrieveOutcome::Record(record) = outcome else {
        panic!("expected a record, got {outcome:?}");
    };
    assert_eq!(record.first_name, "Grace");
    assert_eq!(record.number_of_people.map(|n| n.get()), Some(3));
    assert_eq!(record.activities, vec![Activity::Pool]);
    Ok(())
}

#[tokio::test]
async fn sentinel_body_is_already_confirmed() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    let outcome = webhook.client.retrieve(mock::CONFIRMED_TOKEN).await?;

    assert_eq!(outcome, RetrieveOutcome::AlreadyConfirmed);
    Ok(())
}

#[tokio::test]
async fn unknown_token_is_an_api_error() {
    let webhook = spawn_webhook().await;

    assert_status_code(webhook.client.retrieve("nobody").await, 404);
}

#[tokio::test]
async fn server_errors_are_api_errors() {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);
    webhook.store.fail_retrievals_with(Some(503));

    assert_status_code(webhook.client.retrieve(mock::PENDING_TOKEN).await, 503);
}

#[tokio::test]
async fn tokens_are_query_encoded() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    webhook.store.stage("a b&c=d", &mock::booking_b());

    let outcome = webhook.client.retrieve("a b&c=d").await?;

    assert!(matches!(outcome, RetrieveOutcome::Record(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let webhook = spawn_webhook().await;
    let client = payloads::WebhookClient::new(
        "http://127.0.0.1:9/webhook/booking-details",
        webhook.client.confirm_url.clone(),
    );

    let result = client.retrieve("tok").await;

    assert!(matches!(result, Err(ClientError::Network(_))));
}
