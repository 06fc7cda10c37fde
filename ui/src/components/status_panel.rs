use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Properties, PartialEq)]
pub struct StatusPanelProps {
    pub kind: StatusKind,
    pub title: AttrValue,
    pub message: AttrValue,
}

/// A terminal message shown in place of the form.
#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let tone_class = match props.kind {
        StatusKind::Info => "bg-neutral-50 border-neutral-200 text-neutral-700",
        StatusKind::Success => "bg-green-50 border-green-200 text-green-700",
        StatusKind::Error => "bg-red-50 border-red-200 text-red-700",
    };

    html! {
        <div class={classes!("p-6", "rounded-lg", "border", "text-center", tone_class)}>
            <h1 class="text-xl font-semibold mb-2">{&props.title}</h1>
            <p class="text-sm">{&props.message}</p>
        </div>
    }
}
