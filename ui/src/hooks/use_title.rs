use yew::prelude::*;

const SUFFIX: &str = "Booking confirmation";

/// Keeps the tab title in step with the page, as `"{title} | Booking
/// confirmation"`.
#[hook]
pub fn use_title(title: &str) {
    let title = format!("{title} | {SUFFIX}");
    use_effect_with(title, |title| {
        match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document.set_title(title),
            None => tracing::warn!("No document to set the title {title:?} on"),
        }
    });
}
