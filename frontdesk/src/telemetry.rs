//! Telemetry initialization: fmt subscriber with env-filter control.
//!
//! Verbosity is driven by `RUST_LOG` in the usual way, e.g.
//! `RUST_LOG=frontdesk=debug,tower_http=debug`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once, from main.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frontdesk=info,tower_http=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
