mod toast_container;
mod toast_item;

pub use toast_container::ToastContainer;
pub use toast_item::ToastItem;
