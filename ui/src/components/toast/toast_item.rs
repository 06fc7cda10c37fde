use crate::contexts::toast::{Toast, ToastType, use_toast};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    let (tone_class, icon) = match toast.toast_type {
        ToastType::Error => ("bg-red-50 border-red-200 text-red-700", "✕"),
        ToastType::Success => {
            ("bg-green-50 border-green-200 text-green-700", "✓")
        }
    };

    let on_close = {
        let toast_id = toast.id;
        Callback::from(move |_| toast_handle.remove(toast_id))
    };

    html! {
        <div class={classes!("p-4", "rounded-lg", "border", "shadow-lg", tone_class)}>
            <div class="flex items-start space-x-3">
                <span class="text-sm font-medium">{icon}</span>
                <p class="flex-1 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button onclick={on_close} class="text-neutral-400" title="Dismiss">
                    {"×"}
                </button>
            </div>
        </div>
    }
}
