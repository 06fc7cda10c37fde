use payloads::{Activity, BookingField, BookingRecord};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingFormProps {
    pub record: BookingRecord,
    pub is_submitting: bool,
    /// False blocks the submit button, e.g. while a field is invalid.
    pub can_submit: bool,
    /// Message from a failed submission, shown above the submit button.
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// A rejected edit, shown under the field it belongs to.
    #[prop_or_default]
    pub field_error: Option<(BookingField, AttrValue)>,
    pub on_edit: Callback<(BookingField, String)>,
    pub on_toggle_activity: Callback<(Activity, bool)>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn BookingForm(props: &BookingFormProps) -> Html {
    let record = &props.record;
    let disabled = props.is_submitting;
    let error_for = |field: BookingField| {
        props
            .field_error
            .as_ref()
            .filter(|(invalid, _)| *invalid == field)
            .map(|(_, message)| message.clone())
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_note_input = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_edit.emit((BookingField::Note, textarea.value()));
        })
    };

    let text_field = |field: BookingField, label: &'static str, input_type: &'static str| {
        html! {
            <TextField
                {field}
                {label}
                {input_type}
                value={record.value(field)}
                {disabled}
                error={error_for(field)}
                on_edit={props.on_edit.clone()}
            />
        }
    };

    html! {
        <form onsubmit={on_submit} class="space-y-6 bg-white p-8 rounded-lg shadow-md">
            <div>
                <h1 class="text-2xl font-bold mb-1">{"Confirm your booking"}</h1>
                if !record.venue.is_empty() {
                    <p class="text-sm text-neutral-600">{&record.venue}</p>
                }
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                {text_field(BookingField::FirstName, "First name", "text")}
                {text_field(BookingField::LastName, "Last name", "text")}
                {text_field(BookingField::Email, "Email", "email")}
                {text_field(BookingField::PhoneNumber, "Phone number", "tel")}
                {text_field(BookingField::StartTime, "Start time", "datetime-local")}
                {text_field(BookingField::EndTime, "End time", "datetime-local")}
            </div>

            <PartySizeField
                value={record.value(BookingField::NumberOfPeople)}
                {disabled}
                error={error_for(BookingField::NumberOfPeople)}
                on_edit={props.on_edit.clone()}
            />

            <fieldset>
                <legend class="block text-sm font-medium mb-2">{"Activities"}</legend>
                <div class="flex flex-wrap gap-4">
                    {for Activity::ALL.into_iter().map(|activity| html! {
                        <ActivityCheckbox
                            key={activity.to_string()}
                            {activity}
                            checked={record.has_activity(activity)}
                            {disabled}
                            on_toggle={props.on_toggle_activity.clone()}
                        />
                    })}
                </div>
            </fieldset>

            <div>
                <label for="note" class="block text-sm font-medium mb-1">{"Note"}</label>
                <textarea
                    id="note"
                    rows="3"
                    value={record.note.clone()}
                    oninput={on_note_input}
                    disabled={disabled}
                    class="w-full px-3 py-2 border border-neutral-300 rounded-md"
                />
            </div>

            if let Some(error) = &props.error {
                <div class="p-4 rounded-md bg-red-50 border border-red-200">
                    <p class="text-sm text-red-700">{error.clone()}</p>
                </div>
            }

            <button
                type="submit"
                disabled={disabled || !props.can_submit}
                class="w-full py-2 px-4 rounded-md text-sm font-medium text-white \
                       bg-neutral-900 hover:bg-neutral-800 \
                       disabled:opacity-50 disabled:cursor-not-allowed"
            >
                {if disabled { "Confirming..." } else { "Confirm booking" }}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TextFieldProps {
    field: BookingField,
    label: &'static str,
    input_type: &'static str,
    value: String,
    disabled: bool,
    error: Option<AttrValue>,
    on_edit: Callback<(BookingField, String)>,
}

#[function_component]
fn TextField(props: &TextFieldProps) -> Html {
    let id = props.field.wire_name();
    let oninput = {
        let field = props.field;
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_edit.emit((field, input.value()));
        })
    };

    html! {
        <div>
            <label for={id} class="block text-sm font-medium mb-1">{props.label}</label>
            <input
                id={id}
                name={id}
                type={props.input_type}
                value={props.value.clone()}
                oninput={oninput}
                disabled={props.disabled}
                class="w-full px-3 py-2 border border-neutral-300 rounded-md"
            />
            <FieldMessage error={props.error.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PartySizeFieldProps {
    value: String,
    disabled: bool,
    error: Option<AttrValue>,
    on_edit: Callback<(BookingField, String)>,
}

#[function_component]
fn PartySizeField(props: &PartySizeFieldProps) -> Html {
    let oninput = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_edit.emit((BookingField::NumberOfPeople, input.value()));
        })
    };

    html! {
        <div>
            <label for="numberOfPeople" class="block text-sm font-medium mb-1">
                {"Number of people"}
            </label>
            <input
                id="numberOfPeople"
                name="numberOfPeople"
                type="number"
                min="1"
                step="1"
                value={props.value.clone()}
                oninput={oninput}
                disabled={props.disabled}
                class="w-32 px-3 py-2 border border-neutral-300 rounded-md"
            />
            <FieldMessage error={props.error.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FieldMessageProps {
    error: Option<AttrValue>,
}

#[function_component]
fn FieldMessage(props: &FieldMessageProps) -> Html {
    match &props.error {
        Some(error) => html! {
            <p class="mt-1 text-sm text-red-600" role="alert">{error.clone()}</p>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct ActivityCheckboxProps {
    activity: Activity,
    checked: bool,
    disabled: bool,
    on_toggle: Callback<(Activity, bool)>,
}

#[function_component]
fn ActivityCheckbox(props: &ActivityCheckboxProps) -> Html {
    let onchange = {
        let activity = props.activity;
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_toggle.emit((activity, input.checked()));
        })
    };

    html! {
        <label class="inline-flex items-center gap-2 text-sm">
            <input
                type="checkbox"
                checked={props.checked}
                onchange={onchange}
                disabled={props.disabled}
            />
            {props.activity.to_string()}
        </label>
    }
}
