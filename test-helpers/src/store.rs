use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use payloads::{ALREADY_CONFIRMED, BookingRecord};
use serde_json::{Value, json};

/// Form parts received by the confirmation endpoint, keyed by part name.
pub type Confirmation = BTreeMap<String, String>;

/// In-memory state behind the stand-in webhooks.
///
/// Cloning shares the same state, so tests keep a handle while the server
/// owns another.
#[derive(Clone, Default)]
pub struct WebhookStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// Retrieval body served per token.
    staged: HashMap<String, Value>,
    /// Booking ids that have been confirmed.
    confirmed_ids: HashSet<String>,
    confirmations: Vec<Confirmation>,
    retrieve_hits: usize,
    retrieve_failure: Option<u16>,
    confirm_failure: Option<u16>,
}

impl WebhookStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("webhook store lock poisoned")
    }

    /// Serve `body` verbatim for retrievals of `token`.
    pub fn stage_body(&self, token: impl Into<String>, body: Value) {
        self.lock().staged.insert(token.into(), body);
    }

    /// Serve `record` nested under `user`, the usual retrieval shape.
    pub fn stage(&self, token: impl Into<String>, record: &BookingRecord) {
        self.stage_body(token, json!({ "user": record }));
    }

    /// Answer every retrieval with `status` until cleared with `None`.
    pub fn fail_retrievals_with(&self, status: Option<u16>) {
        self.lock().retrieve_failure = status;
    }

    /// Answer every confirmation with `status` until cleared with `None`.
    pub fn fail_confirmations_with(&self, status: Option<u16>) {
        self.lock().confirm_failure = status;
    }

    /// Number of retrieval requests received, including failed ones.
    pub fn retrieve_hits(&self) -> usize {
        self.lock().retrieve_hits
    }

    /// Confirmations accepted so far, oldest first.
    pub fn confirmations(&self) -> Vec<Confirmation> {
        self.lock().confirmations.clone()
    }

    /// Resolve a retrieval, returning the body or the status to fail with.
    pub(crate) fn retrieve(&self, token: Option<&str>) -> Result<Value, u16> {
        let mut inner = self.lock();
        inner.retrieve_hits += 1;

        if let Some(status) = inner.retrieve_failure {
            return Err(status);
        }
        let body = token
            .and_then(|token| inner.staged.get(token))
            .ok_or(404_u16)?;

        let booking_id = body
            .get("user")
            .unwrap_or(body)
            .get("id")
            .and_then(Value::as_str);
        if booking_id.is_some_and(|id| inner.confirmed_ids.contains(id)) {
            return Ok(json!({ "result": ALREADY_CONFIRMED }));
        }
        Ok(body.clone())
    }

    /// Record a confirmation, or return the status to fail with.
    pub(crate) fn confirm(&self, fields: Confirmation) -> Result<(), u16> {
        let mut inner = self.lock();
        if let Some(status) = inner.confirm_failure {
            return Err(status);
        }
        if let Some(id) = fields.get("id").filter(|id| !id.is_empty()) {
            inner.confirmed_ids.insert(id.clone());
        }
        inner.confirmations.push(fields);
        Ok(())
    }
}
