use payloads::{
    Activity, BookingField, ConfirmAction, ConfirmError, ConfirmationState,
    confirmation::submit_booking,
};
use yew::prelude::*;

use crate::components::{BookingForm, StatusKind, StatusPanel};
use crate::contexts::use_toast;
use crate::get_webhook_client;
use crate::hooks::{use_confirmation, use_title};

#[function_component]
pub fn ConfirmBookingPage() -> Html {
    let session = use_confirmation();
    use_title(page_title(&session.0));
    let toast = use_toast();
    // Guards against a second click landing before the disabled button renders
    let in_flight = use_mut_ref(|| false);

    let on_edit = {
        let session = session.clone();
        Callback::from(move |(field, value): (BookingField, String)| {
            session.dispatch(ConfirmAction::Edit(field, value));
        })
    };

    let on_toggle_activity = {
        let session = session.clone();
        Callback::from(move |(activity, on): (Activity, bool)| {
            session.dispatch(ConfirmAction::ToggleActivity(activity, on));
        })
    };

    let on_submit = {
        let session = session.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let state = &session.0;
            if !state.can_submit() || *in_flight.borrow() {
                return;
            }
            let Some(record) = state.record().cloned() else {
                return;
            };

            *in_flight.borrow_mut() = true;
            session.dispatch(ConfirmAction::BeginSubmit);

            let session = session.clone();
            let toast = toast.clone();
            let in_flight = in_flight.clone();
            yew::platform::spawn_local(async move {
                let result = submit_booking(&get_webhook_client(), &record).await;
                match &result {
                    Ok(()) => toast.success("Your booking is confirmed!"),
                    Err(e) => toast.error(e.to_string()),
                }
                *in_flight.borrow_mut() = false;
                session.dispatch(ConfirmAction::SubmitFinished(result));
            });
        })
    };

    html! {
        <ConfirmBookingView
            state={session.0.clone()}
            {on_edit}
            {on_toggle_activity}
            {on_submit}
        />
    }
}

fn page_title(state: &ConfirmationState) -> &'static str {
    match state {
        ConfirmationState::Loading => "Loading",
        ConfirmationState::MissingToken | ConfirmationState::LoadError(_) => {
            "Booking unavailable"
        }
        ConfirmationState::AlreadyConfirmed => "Already confirmed",
        ConfirmationState::Submitted => "Confirmed",
        _ => "Confirm your booking",
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmBookingViewProps {
    pub state: ConfirmationState,
    pub on_edit: Callback<(BookingField, String)>,
    pub on_toggle_activity: Callback<(Activity, bool)>,
    pub on_submit: Callback<()>,
}

/// Renders one confirmation state. Holds no state of its own.
#[function_component]
pub fn ConfirmBookingView(props: &ConfirmBookingViewProps) -> Html {
    let state = &props.state;
    match state {
        ConfirmationState::Loading => html! {
            <div class="text-center py-12">
                <div class="animate-spin rounded-full h-12 w-12 border-b-2 \
                            border-neutral-600 mx-auto mb-4">
                </div>
                <p class="text-neutral-600">{"Loading your booking..."}</p>
            </div>
        },
        ConfirmationState::MissingToken => html! {
            <StatusPanel
                kind={StatusKind::Error}
                title="Link incomplete"
                message={ConfirmError::MissingToken.to_string()}
            />
        },
        ConfirmationState::LoadError(message) => html! {
            <StatusPanel
                kind={StatusKind::Error}
                title="Something went wrong"
                message={message.clone()}
            />
        },
        ConfirmationState::AlreadyConfirmed => html! {
            <StatusPanel
                kind={StatusKind::Info}
                title="Already confirmed"
                message={payloads::ALREADY_CONFIRMED}
            />
        },
        ConfirmationState::Submitted => html! {
            <StatusPanel
                kind={StatusKind::Success}
                title="Thank you!"
                message="Your booking details have been confirmed. You can close this page."
            />
        },
        ConfirmationState::Editable(record)
        | ConfirmationState::Submitting(record)
        | ConfirmationState::SubmitError { record, .. }
        | ConfirmationState::InvalidEdit { record, .. } => html! {
            <BookingForm
                record={record.clone()}
                is_submitting={state.is_submitting()}
                can_submit={state.can_submit()}
                error={state.submit_error().map(|m| AttrValue::from(m.to_string()))}
                field_error={state
                    .field_error()
                    .map(|(field, m)| (field, AttrValue::from(m.to_string())))}
                on_edit={props.on_edit.clone()}
                on_toggle_activity={props.on_toggle_activity.clone()}
                on_submit={props.on_submit.clone()}
            />
        },
    }
}
