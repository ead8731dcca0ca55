use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use weather_core::{Config, provider_from_config};

use crate::{logging, routes};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Simplified weather classification service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. "127.0.0.1:8080". Overrides config and WEATHER_BIND.
    #[arg(long)]
    pub bind: Option<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        logging::init()?;

        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        if let Some(bind) = self.bind {
            config.bind = Some(bind);
        }

        // Refuse to start without a credential.
        config.validate().context("Invalid configuration")?;
        let provider = provider_from_config(&config)?;

        let app = routes::router(routes::AppState::new(Arc::from(provider)));

        let listener = TcpListener::bind(config.bind())
            .await
            .with_context(|| format!("Failed to bind {}", config.bind()))?;
        info!("Server started on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
