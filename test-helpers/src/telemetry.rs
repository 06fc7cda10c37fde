//! Native logging for the stand-in webhooks and the tests that drive them.

use std::sync::Once;

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Subscriber for long-running processes, logging to stderr.
/// `RUST_LOG` overrides `default_filter`.
pub fn get_subscriber(default_filter: &str) -> impl Subscriber + Sync + Send {
    let stderr = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(true);
    Registry::default().with(env_filter(default_filter)).with(stderr)
}

/// Register a subscriber as global default.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Install a subscriber whose output the test harness captures.
///
/// Quiet unless `RUST_LOG` asks otherwise. Safe to call from every test.
/// `try_init` also bridges `log` records.
pub fn init_test_subscriber() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let captured = fmt::Layer::new().with_test_writer().compact();
        let _ = Registry::default()
            .with(env_filter("error"))
            .with(captured)
            .try_init();
    });
}
