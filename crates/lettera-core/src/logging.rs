//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,lettera_text=debug,lettera_ecs=info";

/// Install a global fmt subscriber, honouring `RUST_LOG` when present.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_with_filter(filter);
}

/// Install a global fmt subscriber with an explicit filter.
pub fn init_with_filter(filter: impl Into<EnvFilter>) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter.into())
        .try_init();
    if result.is_err() {
        tracing::trace!("global subscriber already installed");
    }
}
