use crate::{BookingRecord, RetrieveOutcome};
use reqwest::StatusCode;
use reqwest::multipart::Form;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Webhook returning the staged booking for a token.
pub const RETRIEVE_ENDPOINT: &str =
    "https://automation.bookd-events.com/webhook/booking-details";

/// Webhook accepting the confirmed booking.
pub const CONFIRM_ENDPOINT: &str =
    "https://automation.bookd-events.com/webhook/booking-confirm";

/// A client for the two booking webhooks of the workflow automation service.
#[derive(Clone)]
pub struct WebhookClient {
    pub retrieve_url: String,
    pub confirm_url: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl WebhookClient {
    pub fn new(
        retrieve_url: impl Into<String>,
        confirm_url: impl Into<String>,
    ) -> Self {
        Self {
            retrieve_url: retrieve_url.into(),
            confirm_url: confirm_url.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    async fn get_with_token(&self, token: &str) -> ReqwestResult {
        self.inner_client
            .get(&self.retrieve_url)
            .query(&[(crate::token::TOKEN_PARAM, token)])
            .send()
            .await
    }

    async fn post_form(&self, form: Form) -> ReqwestResult {
        self.inner_client
            .post(&self.confirm_url)
            .multipart(form)
            .send()
            .await
    }
}

/// Methods on the booking webhooks
impl WebhookClient {
    /// Fetch the staged booking for a token.
    pub async fn retrieve(
        &self,
        token: &str,
    ) -> Result<RetrieveOutcome, ClientError> {
        let response = self.get_with_token(token).await?;
        let body = ok_text(response).await?;
        Ok(RetrieveOutcome::from_json(&body)?)
    }

    /// Send the edited booking as `multipart/form-data`, one text part per
    /// field. The response body is not inspected.
    pub async fn confirm(
        &self,
        record: &BookingRecord,
    ) -> Result<(), ClientError> {
        let form = record
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        let response = self.post_form(form).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-success status, containing response text.
    #[error("{0}: {1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from the booking service.")]
    Decode(#[from] serde_json::Error),
}

/// Read the body of a successful response, or return an appropriate error.
pub async fn ok_text(response: reqwest::Response) -> Result<String, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.text().await?)
}

/// Check that a response is OK, discarding the body.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
