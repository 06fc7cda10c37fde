use payloads::WebhookClient;
use yew::prelude::*;

mod components;
mod contexts;
mod hooks;
pub mod logs;
mod pages;

use components::ToastContainer;
use contexts::ToastProvider;
use pages::ConfirmBookingPage;

/// Client for the booking webhooks.
///
/// The endpoints are fixed; local builds can point them at the dev-server by
/// setting RETRIEVE_WEBHOOK_URL and CONFIRM_WEBHOOK_URL at build time.
pub fn get_webhook_client() -> WebhookClient {
    WebhookClient::new(
        option_env!("RETRIEVE_WEBHOOK_URL")
            .unwrap_or(payloads::RETRIEVE_ENDPOINT),
        option_env!("CONFIRM_WEBHOOK_URL").unwrap_or(payloads::CONFIRM_ENDPOINT),
    )
}

#[function_component]
pub fn App() -> Html {
    html! {
        <ToastProvider>
            <div class="min-h-screen bg-neutral-50 text-neutral-900">
                <ToastContainer />
                <main class="max-w-2xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                    <ConfirmBookingPage />
                </main>
            </div>
        </ToastProvider>
    }
}
