use anyhow::Result;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "weather_server=info,weather_core=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` wins over the default filter.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    debug!("Logging initialized");
    Ok(())
}
