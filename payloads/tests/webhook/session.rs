use jiff::tz::TimeZone;
use payloads::{
    Activity, BookingField, ConfirmAction, ConfirmationState, dates,
};
use serde_json::json;
use test_helpers::{mock, spawn_webhook};

#[tokio::test]
async fn missing_token_makes_no_request() {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    let state = ConfirmationState::start(
        &webhook.client,
        "http://127.0.0.1:8080/?utm_source=mail",
        &TimeZone::UTC,
    )
    .await;

    assert_eq!(state, ConfirmationState::MissingToken);
    assert_eq!(webhook.store.retrieve_hits(), 0);
}

#[tokio::test]
async fn already_confirmed_shows_no_form() {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::CONFIRMED_TOKEN),
        &TimeZone::UTC,
    )
    .await;

    assert_eq!(state, ConfirmationState::AlreadyConfirmed);
    assert!(state.record().is_none());
    assert!(!state.is_editable());
}

#[tokio::test]
async fn loaded_record_is_localized() {
    let webhook = spawn_webhook().await;
    webhook.store.stage_body(
        "tok",
        json!({
            "user": {
                "firstName": "Ada",
                "activities": ["Bowling"],
                "startTime": "2024-05-01T10:00:00Z",
            }
        }),
    );

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url("tok"),
        &TimeZone::UTC,
    )
    .await;
    let record = state.record().expect("editable record");
    assert_eq!(record.first_name, "Ada");
    assert_eq!(record.activities, vec![Activity::Bowling]);
    assert_eq!(record.start_time, "2024-05-01T10:00");
    assert_eq!(record.end_time, "");

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url("tok"),
        &TimeZone::system(),
    )
    .await;
    assert_eq!(
        state.record().map(|r| r.start_time.as_str()),
        Some(dates::to_local_input("2024-05-01T10:00:00Z").as_str())
    );
}

#[tokio::test]
async fn load_failure_is_terminal() {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);
    webhook.store.fail_retrievals_with(Some(502));

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::PENDING_TOKEN),
        &TimeZone::UTC,
    )
    .await;

    assert!(matches!(state, ConfirmationState::LoadError(_)));
    assert!(state.error_message().is_some());
    let state = state.submit(&webhook.client).await;
    assert!(matches!(state, ConfirmationState::LoadError(_)));
    assert!(webhook.store.confirmations().is_empty());
}

#[tokio::test]
async fn failed_submit_preserves_the_form() {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);
    webhook.store.fail_confirmations_with(Some(500));

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::PENDING_TOKEN),
        &TimeZone::UTC,
    )
    .await
    .reduce(ConfirmAction::Edit(BookingField::Note, "Ramp needed".into()));
    let before = state.record().cloned();

    let state = state.submit(&webhook.client).await;

    assert!(matches!(state, ConfirmationState::SubmitError { .. }));
    assert_eq!(state.record().cloned(), before);
    assert!(state.can_submit());
    assert!(!state.is_submitting());
}

#[tokio::test]
async fn retry_after_failure_confirms() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);
    webhook.store.fail_confirmations_with(Some(500));

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::FLAT_TOKEN),
        &TimeZone::UTC,
    )
    .await
    .submit(&webhook.client)
    .await;
    assert!(matches!(state, ConfirmationState::SubmitError { .. }));

    webhook.store.fail_confirmations_with(None);
    let state = state
        .reduce(ConfirmAction::ToggleActivity(Activity::BeerPong, false))
        .submit(&webhook.client)
        .await;

    assert_eq!(state, ConfirmationState::Submitted);
    let confirmations = webhook.store.confirmations();
    assert_eq!(confirmations.len(), 1);
    assert_eq!(confirmations[0]["activities"], r#"["Pool"]"#);
    assert_eq!(confirmations[0]["startTime"], "2024-06-14T22:00");
    Ok(())
}

#[tokio::test]
async fn happy_path_confirms_the_edited_booking() -> anyhow::Result<()> {
    let webhook = spawn_webhook().await;
    mock::seed(&webhook.store);

    let state = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::PENDING_TOKEN),
        &TimeZone::UTC,
    )
    .await;
    assert!(state.is_editable());

    let state = state
        .reduce(ConfirmAction::Edit(BookingField::NumberOfPeople, "4".into()))
        .submit(&webhook.client)
        .await;

    assert_eq!(state, ConfirmationState::Submitted);
    assert!(state.record().is_none());
    assert!(!state.is_editable());

    let received = &webhook.store.confirmations()[0];
    assert_eq!(received["numberOfPeople"], "4");
    assert_eq!(received["firstName"], "Ada");
    assert_eq!(received["startTime"], "2024-05-01T10:00");
    assert_eq!(received["endTime"], "2024-05-01T12:30");

    // The next visit finds the booking confirmed
    let revisit = ConfirmationState::start(
        &webhook.client,
        &webhook.page_url(mock::PENDING_TOKEN),
        &TimeZone::UTC,
    )
    .await;
    assert_eq!(revisit, ConfirmationState::AlreadyConfirmed);
    Ok(())
}
