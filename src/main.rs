//! GitHub raw-content reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                    GIT PROXY                        │
//!                     │                                                     │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌─────────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ routing  │──▶│    handlers     │  │
//!                     │  │ server  │   │  table   │   │ file/index/icon │  │
//!                     │  └─────────┘   └──────────┘   └────────┬────────┘  │
//!                     │                                        │           │
//!                     │             ┌───────────┐     ┌────────▼────────┐  │
//!   Client Response   │             │ response  │◀────│  github origin  │◀─┼── raw.githubusercontent.com
//!   ◀─────────────────┼─────────────│  cache    │     │     client      │  │
//!                     │             └───────────┘     └─────────────────┘  │
//!                     │                                                     │
//!                     │  cross-cutting: config · compress · observability   │
//!                     └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use git_proxy::config::loader::load_config;
use git_proxy::observability::{logging, metrics};
use git_proxy::HttpServer;

/// Edge proxy that re-serves GitHub raw content with caching and compression.
#[derive(Debug, Parser)]
#[command(name = "git-proxy", version)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_owner = %config.github.default_owner,
        default_repo = %config.github.default_repo,
        default_branch = %config.github.default_branch,
        raw_base_url = %config.github.raw_base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
