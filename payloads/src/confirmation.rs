//! The confirmation session: load a staged booking, let the user edit it, and
//! hand it back to the confirmation webhook.
//!
//! [`ConfirmationState`] is a plain reducer so the browser UI and native
//! callers drive exactly the same transitions.

use std::error::Error as _;

use jiff::tz::TimeZone;

use crate::{
    Activity, BookingField, BookingRecord, ClientError, FieldError,
    RetrieveOutcome, WebhookClient, token::token_from_url,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error(
        "No booking token was provided. Please use the link from your \
         confirmation email."
    )]
    MissingToken,
    #[error(
        "We couldn't load your booking details. Please try again later."
    )]
    LoadFailed(#[source] ClientError),
    #[error("We couldn't confirm your booking. Please try again.")]
    SubmitFailed(#[source] ClientError),
}

/// Fetch the booking referenced by the `token` parameter of `page_url`,
/// rendering its start and end times in `tz`.
///
/// No request is made when the token is missing.
pub async fn load_booking(
    client: &WebhookClient,
    page_url: &str,
    tz: &TimeZone,
) -> Result<RetrieveOutcome, ConfirmError> {
    let token = token_from_url(page_url).ok_or(ConfirmError::MissingToken)?;
    let outcome = client
        .retrieve(&token)
        .await
        .map_err(ConfirmError::LoadFailed)?;
    Ok(match outcome {
        RetrieveOutcome::Record(record) => {
            RetrieveOutcome::Record(record.with_local_times(tz))
        }
        RetrieveOutcome::AlreadyConfirmed => RetrieveOutcome::AlreadyConfirmed,
    })
}

/// Send the booking to the confirmation webhook.
pub async fn submit_booking(
    client: &WebhookClient,
    record: &BookingRecord,
) -> Result<(), ConfirmError> {
    client
        .confirm(record)
        .await
        .map_err(ConfirmError::SubmitFailed)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    /// Waiting for the retrieval webhook.
    #[default]
    Loading,
    /// The page address carries no token.
    MissingToken,
    /// The booking could not be retrieved.
    LoadError(String),
    /// The booking was confirmed in an earlier session.
    AlreadyConfirmed,
    Editable(BookingRecord),
    /// A confirmation request is in flight.
    Submitting(BookingRecord),
    /// The last confirmation attempt failed; the form stays editable.
    SubmitError {
        record: BookingRecord,
        message: String,
    },
    /// The last edit of `field` was rejected. `record` keeps the previous
    /// value and submission is blocked until `field` gets a valid value.
    InvalidEdit {
        record: BookingRecord,
        field: BookingField,
        message: String,
    },
    Submitted,
}

pub enum ConfirmAction {
    LoadFinished(Result<RetrieveOutcome, ConfirmError>),
    Edit(BookingField, String),
    ToggleActivity(Activity, bool),
    BeginSubmit,
    SubmitFinished(Result<(), ConfirmError>),
}

impl ConfirmationState {
    /// The working record, while there is one.
    pub fn record(&self) -> Option<&BookingRecord> {
        match self {
            Self::Editable(record)
            | Self::Submitting(record)
            | Self::SubmitError { record, .. }
            | Self::InvalidEdit { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Whether the form should be rendered with live inputs.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            Self::Editable(_) | Self::SubmitError { .. } | Self::InvalidEdit { .. }
        )
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Whether a submission may start now. False while one is in flight or
    /// a field holds a rejected value.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Editable(_) | Self::SubmitError { .. })
    }

    /// Message describing the most recent failure, if the current state has
    /// one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::LoadError(message)
            | Self::SubmitError { message, .. }
            | Self::InvalidEdit { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Message from the last failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        match self {
            Self::SubmitError { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The field whose last edit was rejected, with the reason.
    pub fn field_error(&self) -> Option<(BookingField, &str)> {
        match self {
            Self::InvalidEdit { field, message, .. } => Some((*field, message)),
            _ => None,
        }
    }

    /// Validate and apply an edit to the working record.
    ///
    /// A rejected value leaves the record alone and moves to
    /// [`Self::InvalidEdit`] so the form can say why. A later valid value for
    /// the same field clears it.
    fn edit(self, field: BookingField, value: String) -> Self {
        match self {
            Self::Editable(mut record) => match record.set_field(field, value) {
                Ok(()) => Self::Editable(record),
                Err(e) => Self::rejected(record, field, e),
            },
            Self::SubmitError {
                mut record,
                message,
            } => match record.set_field(field, value) {
                Ok(()) => Self::SubmitError { record, message },
                Err(e) => Self::rejected(record, field, e),
            },
            Self::InvalidEdit {
                mut record,
                field: invalid,
                message,
            } => match record.set_field(field, value) {
                Ok(()) if field == invalid => Self::Editable(record),
                Ok(()) => Self::InvalidEdit {
                    record,
                    field: invalid,
                    message,
                },
                Err(e) => Self::rejected(record, field, e),
            },
            state => {
                tracing::debug!("Ignoring edit of {field:?} outside the form");
                state
            }
        }
    }

    fn rejected(
        record: BookingRecord,
        field: BookingField,
        e: FieldError,
    ) -> Self {
        tracing::warn!("Rejected edit: {e}");
        Self::InvalidEdit {
            record,
            field,
            message: e.to_string(),
        }
    }

    pub fn reduce(self, action: ConfirmAction) -> Self {
        match (self, action) {
            (Self::Loading, ConfirmAction::LoadFinished(result)) => {
                match result {
                    Ok(RetrieveOutcome::AlreadyConfirmed) => {
                        tracing::info!("Booking was already confirmed");
                        Self::AlreadyConfirmed
                    }
                    Ok(RetrieveOutcome::Record(record)) => {
                        tracing::debug!("Loaded booking {}", record.id);
                        Self::Editable(record)
                    }
                    Err(ConfirmError::MissingToken) => {
                        tracing::error!("Page opened without a booking token");
                        Self::MissingToken
                    }
                    Err(e) => {
                        log_error(&e);
                        Self::LoadError(e.to_string())
                    }
                }
            }
            (state, ConfirmAction::Edit(field, value)) => state.edit(field, value),
            (
                Self::Editable(mut record),
                ConfirmAction::ToggleActivity(activity, on),
            ) => {
                record.toggle_activity(activity, on);
                Self::Editable(record)
            }
            (
                Self::SubmitError {
                    mut record,
                    message,
                },
                ConfirmAction::ToggleActivity(activity, on),
            ) => {
                record.toggle_activity(activity, on);
                Self::SubmitError { record, message }
            }
            (
                Self::InvalidEdit {
                    mut record,
                    field,
                    message,
                },
                ConfirmAction::ToggleActivity(activity, on),
            ) => {
                record.toggle_activity(activity, on);
                Self::InvalidEdit {
                    record,
                    field,
                    message,
                }
            }
            (
                Self::Editable(record) | Self::SubmitError { record, .. },
                ConfirmAction::BeginSubmit,
            ) => {
                tracing::debug!("Submitting booking {}", record.id);
                Self::Submitting(record)
            }
            (Self::Submitting(record), ConfirmAction::SubmitFinished(result)) => {
                match result {
                    Ok(()) => {
                        tracing::info!("Booking {} confirmed", record.id);
                        Self::Submitted
                    }
                    Err(e) => {
                        log_error(&e);
                        Self::SubmitError {
                            record,
                            message: e.to_string(),
                        }
                    }
                }
            }
            (state, _) => {
                tracing::debug!("Ignoring action in state {state:?}");
                state
            }
        }
    }

    /// Run the load step for a page address, starting from [`Self::Loading`].
    pub async fn start(
        client: &WebhookClient,
        page_url: &str,
        tz: &TimeZone,
    ) -> Self {
        let result = load_booking(client, page_url, tz).await;
        Self::Loading.reduce(ConfirmAction::LoadFinished(result))
    }

    /// Submit the working record and settle on the outcome. Does nothing
    /// unless the form is currently submittable.
    pub async fn submit(self, client: &WebhookClient) -> Self {
        let state = self.reduce(ConfirmAction::BeginSubmit);
        let Self::Submitting(record) = &state else {
            return state;
        };
        let result = submit_booking(client, record).await;
        state.reduce(ConfirmAction::SubmitFinished(result))
    }
}

/// Log an error together with its source.
fn log_error(e: &ConfirmError) {
    match e.source() {
        Some(source) => tracing::error!("{e} ({source})"),
        None => tracing::error!("{e}"),
    }
}
