use std::rc::Rc;

use jiff::tz::TimeZone;
use payloads::{ConfirmAction, ConfirmationState, confirmation::load_booking};
use yew::prelude::*;

use crate::get_webhook_client;

/// The confirmation session owned by the page, as a Yew reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session(pub ConfirmationState);

impl Reducible for Session {
    type Action = ConfirmAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let Session(state) = Rc::unwrap_or_clone(self);
        Rc::new(Session(state.reduce(action)))
    }
}

/// Start the confirmation session: read the token from the page address and
/// load the booking once, on mount.
#[hook]
pub fn use_confirmation() -> UseReducerHandle<Session> {
    let session = use_reducer(Session::default);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                let page_url = web_sys::window()
                    .and_then(|window| window.location().href().ok())
                    .unwrap_or_default();
                let result = load_booking(
                    &get_webhook_client(),
                    &page_url,
                    &TimeZone::system(),
                )
                .await;
                session.dispatch(ConfirmAction::LoadFinished(result));
            });
        });
    }

    session
}
