//! Tracing setup for the `gymcheck` binary.
//!
//! Logs go to stderr so that the report on stdout stays parseable by eye
//! and by `grep`.

use std::io;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. `RUST_LOG` overrides `level`.
///
/// Only the first call takes effect.
pub fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .ok();
}
