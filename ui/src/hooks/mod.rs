mod use_confirmation;
mod use_title;

pub use use_confirmation::use_confirmation;
pub use use_title::use_title;
