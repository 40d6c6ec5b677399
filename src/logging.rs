use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, checked before `RUST_LOG`
pub const LOG_ENV: &str = "TOAST_QUEUE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber
pub fn init() -> anyhow::Result<()> {
    let filter = build_env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    #[cfg(feature = "systemd")]
    if let Ok(journald) = tracing_journald::layer() {
        registry.with(journald).try_init()?;
        return Ok(());
    }

    registry.with(fmt::layer().with_target(false)).try_init()?;
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
