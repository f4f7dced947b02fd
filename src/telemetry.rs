//! Tracing subscriber setup for binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global fmt subscriber filtered by `filter`.
///
/// `RUST_LOG` overrides `filter` when set. An invalid directive string
/// falls back to `info`. If a global subscriber is already installed the
/// existing one is kept.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(env_filter)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global tracing subscriber already initialised, keeping it");
    }
}
