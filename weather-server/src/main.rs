//! Binary crate for the `weather-server` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Logging setup
//! - Serving `GET /weather`

use clap::Parser;

mod cli;
mod logging;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
