//! Browser console logging for the confirmation page.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

const DEFAULT_FILTER: &str = "error,ui=debug,payloads=debug";

/// Install the console subscriber. Call once, before rendering.
///
/// Browsers have no environment, so `UI_LOG` is read when the bundle is
/// built (`UI_LOG=payloads=trace trunk serve`).
pub fn init_logging() {
    let directives = option_env!("UI_LOG").unwrap_or(DEFAULT_FILTER);
    let env_filter = EnvFilter::try_new(directives)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time() // std::time is not available in browsers
        .with_target(true)
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .init();

    tracing::debug!("Console logging with filter {directives:?}");
}
