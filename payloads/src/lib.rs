//! Types and webhook client shared by the booking confirmation UI and its
//! test tooling.

mod api_client;
mod booking;
pub mod confirmation;
pub mod dates;
mod responses;
pub mod token;

pub use api_client::*;
pub use booking::*;
pub use confirmation::{ConfirmAction, ConfirmError, ConfirmationState};
pub use responses::*;
