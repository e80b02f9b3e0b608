//! Process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber once, `RUST_LOG` controlled. Later calls
/// are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
