//! Sample bookings for tests and the development server.

use std::num::NonZeroU32;

use payloads::{Activity, BookingRecord};
use serde_json::json;

use crate::WebhookStore;

/// Token of a booking served nested under `user`.
pub const PENDING_TOKEN: &str = "pending-ada";
/// Token of a booking served at the top level of the body.
pub const FLAT_TOKEN: &str = "pending-grace";
/// Token of a booking that was confirmed before.
pub const CONFIRMED_TOKEN: &str = "confirmed-alan";

/// A staged booking for a group of two, starting 2024-05-01 10:00 UTC.
pub fn booking_a() -> BookingRecord {
    BookingRecord {
        id: "bk_1042".into(),
        event_id: "evt_spring_social".into(),
        venue: "Lucky Lanes".into(),
        currency: "EUR".into(),
        note: "Birthday, bring a cake".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone_number: "+44 20 7946 0958".into(),
        start_time: "2024-05-01T10:00:00Z".into(),
        end_time: "2024-05-01T12:30:00Z".into(),
        activities: vec![Activity::Bowling],
        number_of_people: NonZeroU32::new(2),
    }
}

pub fn booking_b() -> BookingRecord {
    BookingRecord {
        id: "bk_2077".into(),
        event_id: "evt_friday_league".into(),
        venue: "Cue & Cushion".into(),
        currency: "USD".into(),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@example.com".into(),
        start_time: "2024-06-14T18:00:00-04:00".into(),
        end_time: "2024-06-14T21:00:00-04:00".into(),
        activities: vec![Activity::Pool, Activity::BeerPong],
        number_of_people: NonZeroU32::new(6),
        ..Default::default()
    }
}

/// Stage the sample bookings under their tokens.
pub fn seed(store: &WebhookStore) {
    store.stage(PENDING_TOKEN, &booking_a());
    store.stage_body(FLAT_TOKEN, json!(booking_b()));
    store.stage_body(
        CONFIRMED_TOKEN,
        json!({ "result": payloads::ALREADY_CONFIRMED }),
    );
}
