//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,wig=debug,sqlx=warn";

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. A second call keeps the
/// subscriber already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
