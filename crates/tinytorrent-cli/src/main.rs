//! # ttctl
//!
//! ## Usage
//!
//! ```sh,ignore
//! cargo run --release --bin ttctl -- --url http://localhost:9091/transmission/rpc list
//! ```

use clap::Parser;
use thiserror as _;
use tinytorrent_rpc as _;
use tinytorrent_types as _;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tinytorrent_cli::{Cli, run};

#[cfg(test)]
use httpmock as _;

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let output = run(cli).await.inspect_err(|e| error!("{e}"))?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
