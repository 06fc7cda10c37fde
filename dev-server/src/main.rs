//! Development server for booking confirmation UI development
//!
//! Runs the stand-in booking webhooks on a fixed port, seeded with sample
//! bookings, so the UI can be exercised without the automation service.
//!
//! Usage: cargo run -p dev-server
//!
//! PORT (default 8000) may be set directly or in a .env file.

use anyhow::Result;
use test_helpers::{
    CONFIRM_PATH, RETRIEVE_PATH, WebhookStore, address, build, mock, telemetry,
};
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info,test_helpers=debug");
    telemetry::init_subscriber(subscriber);

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    let store = WebhookStore::default();
    mock::seed(&store);
    let (server, port) = build(port, store)?;
    let server = tokio::spawn(server);

    let address = address(port);
    info!("Stand-in webhooks running on {address}");
    info!(
        "UI: cd ui && RETRIEVE_WEBHOOK_URL={address}{RETRIEVE_PATH} \
         CONFIRM_WEBHOOK_URL={address}{CONFIRM_PATH} trunk serve"
    );
    for (token, description) in [
        (mock::PENDING_TOKEN, "pending booking"),
        (mock::FLAT_TOKEN, "pending booking, flat response"),
        (mock::CONFIRMED_TOKEN, "already confirmed"),
    ] {
        info!("  http://127.0.0.1:8080/?token={token}  ({description})");
    }
    info!("  http://127.0.0.1:8080/  (missing token)");
    info!("Press Ctrl+C to shutdown");

    tokio::select! {
        result = server => result??,
        _ = tokio::signal::ctrl_c() => info!("Shutting down development server"),
    }
    Ok(())
}
