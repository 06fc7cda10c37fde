//! Conversion of webhook timestamps into the value format of a
//! `datetime-local` input.

use jiff::{Timestamp, civil, fmt::rfc2822, tz::TimeZone};

/// `YYYY-MM-DDTHH:mm`, minute granularity.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Render a timestamp in the system (browser) time zone for editing.
///
/// Empty input yields an empty string.
pub fn to_local_input(raw: &str) -> String {
    to_input_in(raw, &TimeZone::system())
}

/// Render a timestamp in `tz` for editing.
///
/// Instants with an offset (`2024-05-01T10:00:00Z`) are converted into `tz`.
/// Date-times without an offset are taken to already be wall-clock time, and
/// bare dates are midnight UTC. RFC 2822 dates (`Wed, 01 May 2024 10:00:00
/// GMT`) are accepted too. Anything else renders as an empty string.
pub fn to_input_in(raw: &str, tz: &TimeZone) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match parse_wall_clock(raw, tz) {
        Some(datetime) => datetime.strftime(INPUT_FORMAT).to_string(),
        None => {
            tracing::warn!("Could not parse timestamp {raw:?}");
            String::new()
        }
    }
}

fn parse_wall_clock(raw: &str, tz: &TimeZone) -> Option<civil::DateTime> {
    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(tz.to_datetime(timestamp));
    }

    let has_time = raw.contains(['T', 't', ' ']);
    if !has_time {
        let date = raw.parse::<civil::Date>().ok()?;
        let midnight_utc = date.to_zoned(TimeZone::UTC).ok()?.timestamp();
        return Some(tz.to_datetime(midnight_utc));
    }

    if let Ok(datetime) = raw.parse::<civil::DateTime>() {
        return Some(datetime);
    }

    let zoned = rfc2822::parse(raw).ok()?;
    Some(tz.to_datetime(zoned.timestamp()))
}
