use serde_json::Value;

use crate::BookingRecord;

/// Body the retrieval webhook returns once a booking has been confirmed.
pub const ALREADY_CONFIRMED: &str = "You've already confirmed your details";

/// What the retrieval webhook returned for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieveOutcome {
    /// The booking was confirmed in an earlier session.
    AlreadyConfirmed,
    /// The staged booking, still awaiting confirmation.
    Record(BookingRecord),
}

impl RetrieveOutcome {
    /// Interpret a retrieval body.
    ///
    /// The booking is read from a `user` object when present and from the top
    /// level otherwise. Only the exact sentinel string in `result` counts as
    /// already confirmed.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_str(body)?;

        if value.get("result").and_then(Value::as_str) == Some(ALREADY_CONFIRMED)
        {
            return Ok(Self::AlreadyConfirmed);
        }

        let payload = if value.get("user").is_some_and(Value::is_object) {
            value["user"].take()
        } else {
            value
        };
        Ok(Self::Record(serde_json::from_value(payload)?))
    }
}
