pub mod booking_form;
pub mod status_panel;
pub mod toast;

pub use booking_form::BookingForm;
pub use status_panel::{StatusKind, StatusPanel};
pub use toast::ToastContainer;
