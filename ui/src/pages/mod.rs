mod confirm_booking;

pub use confirm_booking::ConfirmBookingPage;
