use std::num::NonZeroU32;
use std::str::FromStr;

use jiff::tz::TimeZone;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates;

/// Activities a group can add to their booking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Activity {
    Bowling,
    #[serde(rename = "Beer Pong")]
    #[display("Beer Pong")]
    BeerPong,
    Pool,
}

impl Activity {
    /// The full catalog, in display order.
    pub const ALL: [Activity; 3] =
        [Activity::Bowling, Activity::BeerPong, Activity::Pool];
}

impl FromStr for Activity {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|activity| activity.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| FieldError::InvalidField {
                field: BookingField::Activities.wire_name(),
                reason: format!("unknown activity '{name}'"),
            })
    }
}

/// Names of the editable booking fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    Id,
    EventId,
    Venue,
    Currency,
    Note,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    StartTime,
    EndTime,
    Activities,
    NumberOfPeople,
}

impl BookingField {
    /// Every field, in the order they are submitted.
    pub const ALL: [BookingField; 13] = [
        BookingField::Id,
        BookingField::EventId,
        BookingField::Venue,
        BookingField::Currency,
        BookingField::Note,
        BookingField::FirstName,
        BookingField::LastName,
        BookingField::Email,
        BookingField::PhoneNumber,
        BookingField::StartTime,
        BookingField::EndTime,
        BookingField::Activities,
        BookingField::NumberOfPeople,
    ];

    /// Name used for this field in webhook bodies and form parts.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::EventId => "eventId",
            Self::Venue => "venue",
            Self::Currency => "currency",
            Self::Note => "note",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
            Self::Activities => "activities",
            Self::NumberOfPeople => "numberOfPeople",
        }
    }
}

impl FromStr for BookingField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown booking field '{0}'")]
    UnknownField(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A staged booking, as retrieved from the booking webhook and edited by the
/// user before confirmation.
///
/// The webhook is loosely typed: missing or null scalars load as empty
/// strings and numbers are accepted wherever text is expected. Activities
/// outside the catalog are dropped on load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub event_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub venue: String,
    #[serde(deserialize_with = "lenient_string")]
    pub currency: String,
    #[serde(deserialize_with = "lenient_string")]
    pub note: String,
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: String,
    /// `YYYY-MM-DDTHH:mm` local time once loaded.
    #[serde(deserialize_with = "lenient_string")]
    pub start_time: String,
    /// `YYYY-MM-DDTHH:mm` local time once loaded.
    #[serde(deserialize_with = "lenient_string")]
    pub end_time: String,
    #[serde(deserialize_with = "lenient_activities")]
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "lenient_party_size")]
    pub number_of_people: Option<NonZeroU32>,
}

impl BookingRecord {
    /// String rendering of a field, as shown in inputs and submitted.
    pub fn value(&self, field: BookingField) -> String {
        match field {
            BookingField::Id => self.id.clone(),
            BookingField::EventId => self.event_id.clone(),
            BookingField::Venue => self.venue.clone(),
            BookingField::Currency => self.currency.clone(),
            BookingField::Note => self.note.clone(),
            BookingField::FirstName => self.first_name.clone(),
            BookingField::LastName => self.last_name.clone(),
            BookingField::Email => self.email.clone(),
            BookingField::PhoneNumber => self.phone_number.clone(),
            BookingField::StartTime => self.start_time.clone(),
            BookingField::EndTime => self.end_time.clone(),
            BookingField::Activities => activities_json(&self.activities),
            BookingField::NumberOfPeople => self
                .number_of_people
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }

    /// Replace the value of a field.
    ///
    /// `numberOfPeople` must be empty or a positive whole number, and
    /// `activities` a JSON array (or comma separated list) of catalog names.
    /// On error the record is left untouched.
    pub fn set_field(
        &mut self,
        field: BookingField,
        value: impl Into<String>,
    ) -> Result<(), FieldError> {
        let value = value.into();
        let slot = match field {
            BookingField::Activities => {
                let names = activity_names(&value).map_err(|e| {
                    FieldError::InvalidField {
                        field: field.wire_name(),
                        reason: e.to_string(),
                    }
                })?;
                self.activities = names
                    .iter()
                    .map(|name| name.parse())
                    .collect::<Result<Vec<Activity>, _>>()?;
                dedup_in_place(&mut self.activities);
                return Ok(());
            }
            BookingField::NumberOfPeople => {
                self.number_of_people = parse_party_size(&value)?;
                return Ok(());
            }
            BookingField::Id => &mut self.id,
            BookingField::EventId => &mut self.event_id,
            BookingField::Venue => &mut self.venue,
            BookingField::Currency => &mut self.currency,
            BookingField::Note => &mut self.note,
            BookingField::FirstName => &mut self.first_name,
            BookingField::LastName => &mut self.last_name,
            BookingField::Email => &mut self.email,
            BookingField::PhoneNumber => &mut self.phone_number,
            BookingField::StartTime => &mut self.start_time,
            BookingField::EndTime => &mut self.end_time,
        };
        *slot = value;
        Ok(())
    }

    pub fn has_activity(&self, activity: Activity) -> bool {
        self.activities.contains(&activity)
    }

    /// Add (`on`) or remove (`!on`) an activity. Adding an activity that is
    /// already selected is a no-op.
    pub fn toggle_activity(&mut self, activity: Activity, on: bool) {
        if on {
            if !self.has_activity(activity) {
                self.activities.push(activity);
            }
        } else {
            self.activities.retain(|a| *a != activity);
        }
    }

    /// Convert the raw start and end timestamps into local editing format.
    pub fn with_local_times(mut self, tz: &TimeZone) -> Self {
        self.start_time = dates::to_input_in(&self.start_time, tz);
        self.end_time = dates::to_input_in(&self.end_time, tz);
        self
    }

    /// Flatten the record into one text part per field for the confirmation
    /// webhook.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        BookingField::ALL
            .into_iter()
            .map(|field| (field.wire_name(), self.value(field)))
            .collect()
    }
}

fn activities_json(activities: &[Activity]) -> String {
    Value::from(
        activities
            .iter()
            .map(|activity| activity.to_string())
            .collect::<Vec<_>>(),
    )
    .to_string()
}

fn dedup_in_place(activities: &mut Vec<Activity>) {
    let mut seen = Vec::with_capacity(activities.len());
    activities.retain(|activity| {
        if seen.contains(activity) {
            false
        } else {
            seen.push(*activity);
            true
        }
    });
}

/// Split a textual activity list: either a JSON array of names or a comma
/// separated list.
fn activity_names(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    if raw.starts_with('[') {
        return serde_json::from_str(raw);
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_party_size(raw: &str) -> Result<Option<NonZeroU32>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<NonZeroU32>()
        .map(Some)
        .map_err(|_| FieldError::InvalidField {
            field: BookingField::NumberOfPeople.wire_name(),
            reason: "must be a positive whole number".to_string(),
        })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a text value, found {other}"
        ))),
    }
}

fn lenient_activities<'de, D>(deserializer: D) -> Result<Vec<Activity>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::String(s) => activity_names(&s).map_err(de::Error::custom)?,
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                other => {
                    tracing::warn!("Ignoring non-text activity {other}");
                    None
                }
            })
            .collect(),
        other => {
            return Err(de::Error::custom(format!(
                "expected a list of activities, found {other}"
            )));
        }
    };

    let mut activities = Vec::with_capacity(names.len());
    for name in names {
        match name.parse() {
            Ok(activity) => activities.push(activity),
            Err(_) => {
                tracing::warn!("Dropping activity outside the catalog: {name:?}")
            }
        }
    }
    dedup_in_place(&mut activities);
    Ok(activities)
}

fn lenient_party_size<'de, D>(
    deserializer: D,
) -> Result<Option<NonZeroU32>, D::Error>
where
    D: Deserializer<'de>,
{
    let size = match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => {
            let whole = n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            });
            let size = whole
                .and_then(|n| u32::try_from(n).ok())
                .and_then(NonZeroU32::new);
            if size.is_none() {
                tracing::warn!("Dropping invalid party size {n}");
            }
            size
        }
        Value::String(s) => parse_party_size(&s).unwrap_or_else(|e| {
            tracing::warn!("Dropping party size {s:?}: {e}");
            None
        }),
        other => {
            return Err(de::Error::custom(format!(
                "expected a number of people, found {other}"
            )));
        }
    };
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn activity_names_match_the_catalog() {
        assert_eq!("Beer Pong".parse::<Activity>(), Ok(Activity::BeerPong));
        assert_eq!("pool".parse::<Activity>(), Ok(Activity::Pool));
        assert!("Darts".parse::<Activity>().is_err());
        assert_eq!(Activity::BeerPong.to_string(), "Beer Pong");
    }

    #[test]
    fn field_names_round_trip_through_wire_names() {
        for field in BookingField::ALL {
            assert_eq!(field.wire_name().parse::<BookingField>(), Ok(field));
        }
        assert_eq!(
            "favouriteColour".parse::<BookingField>(),
            Err(FieldError::UnknownField("favouriteColour".into()))
        );
    }

    #[test]
    fn toggling_on_then_off_restores_activities() {
        let mut record = BookingRecord {
            activities: vec![Activity::Pool],
            ..Default::default()
        };
        let before = record.activities.clone();

        record.toggle_activity(Activity::Bowling, true);
        assert!(record.has_activity(Activity::Bowling));
        record.toggle_activity(Activity::Bowling, false);

        assert_eq!(record.activities, before);
    }

    #[test]
    fn toggling_on_twice_does_not_duplicate() {
        let mut record = BookingRecord::default();
        record.toggle_activity(Activity::BeerPong, true);
        record.toggle_activity(Activity::BeerPong, true);
        assert_eq!(record.activities, vec![Activity::BeerPong]);
    }

    #[test]
    fn toggling_off_removes_every_occurrence() {
        let mut record = BookingRecord {
            activities: vec![Activity::Pool, Activity::Bowling, Activity::Pool],
            ..Default::default()
        };
        record.toggle_activity(Activity::Pool, false);
        assert_eq!(record.activities, vec![Activity::Bowling]);
    }

    #[test]
    fn set_field_replaces_text() {
        let mut record = BookingRecord::default();
        record.set_field(BookingField::FirstName, "Ada").unwrap();
        record.set_field(BookingField::FirstName, "Grace").unwrap();
        assert_eq!(record.first_name, "Grace");
        assert_eq!(record.value(BookingField::FirstName), "Grace");
    }

    #[test]
    fn party_size_must_be_positive() {
        let mut record = BookingRecord::default();
        record.set_field(BookingField::NumberOfPeople, "4").unwrap();
        assert_eq!(record.number_of_people, NonZeroU32::new(4));

        for bad in ["0", "-2", "two", "2.5"] {
            let err = record
                .set_field(BookingField::NumberOfPeople, bad)
                .unwrap_err();
            assert!(matches!(err, FieldError::InvalidField { .. }));
            assert_eq!(record.number_of_people, NonZeroU32::new(4));
        }

        record.set_field(BookingField::NumberOfPeople, "").unwrap();
        assert_eq!(record.number_of_people, None);
    }

    #[test]
    fn set_activities_rejects_unknown_names() {
        let mut record = BookingRecord::default();
        record
            .set_field(BookingField::Activities, r#"["Pool","Pool","Bowling"]"#)
            .unwrap();
        assert_eq!(record.activities, vec![Activity::Pool, Activity::Bowling]);

        assert!(
            record
                .set_field(BookingField::Activities, "Pool, Darts")
                .is_err()
        );
        assert_eq!(record.activities, vec![Activity::Pool, Activity::Bowling]);
    }

    #[test]
    fn loose_webhook_values_are_coerced() {
        let record: BookingRecord = serde_json::from_value(json!({
            "id": 1042,
            "eventId": null,
            "firstName": "Ada",
            "activities": ["Bowling", "Darts", "Bowling", 7],
            "numberOfPeople": "6",
        }))
        .unwrap();

        assert_eq!(record.id, "1042");
        assert_eq!(record.event_id, "");
        assert_eq!(record.last_name, "");
        assert_eq!(record.activities, vec![Activity::Bowling]);
        assert_eq!(record.number_of_people, NonZeroU32::new(6));
    }

    #[test]
    fn activities_may_arrive_as_encoded_text() {
        let record: BookingRecord = serde_json::from_value(json!({
            "activities": "[\"Beer Pong\",\"Pool\"]",
        }))
        .unwrap();
        assert_eq!(record.activities, vec![Activity::BeerPong, Activity::Pool]);
    }

    #[test]
    fn invalid_party_size_from_webhook_is_dropped() {
        let record: BookingRecord =
            serde_json::from_value(json!({ "numberOfPeople": 0 })).unwrap();
        assert_eq!(record.number_of_people, None);
    }

    #[test]
    fn nested_objects_are_not_text() {
        let result = serde_json::from_value::<BookingRecord>(json!({
            "firstName": { "given": "Ada" },
        }));
        assert!(result.is_err());
    }

    #[test]
    fn form_fields_cover_every_field_as_text() {
        let record = BookingRecord {
            id: "b-1".into(),
            first_name: "Ada".into(),
            start_time: "2024-05-01T12:00".into(),
            activities: vec![Activity::Bowling, Activity::BeerPong],
            number_of_people: NonZeroU32::new(4),
            ..Default::default()
        };

        let fields = record.form_fields();
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        let expected: Vec<_> =
            BookingField::ALL.iter().map(|f| f.wire_name()).collect();
        assert_eq!(names, expected);

        let get = |name: &str| {
            fields
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("id"), "b-1");
        assert_eq!(get("venue"), "");
        assert_eq!(get("startTime"), "2024-05-01T12:00");
        assert_eq!(get("activities"), r#"["Bowling","Beer Pong"]"#);
        assert_eq!(get("numberOfPeople"), "4");
    }

    #[test]
    fn empty_activities_submit_as_empty_array() {
        let record = BookingRecord::default();
        assert_eq!(record.value(BookingField::Activities), "[]");
        assert_eq!(record.value(BookingField::NumberOfPeople), "");
    }
}
