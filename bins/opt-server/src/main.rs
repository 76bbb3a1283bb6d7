//! Optionality Tracker HTTP server.
//!
//! Serves the action and exposure logs, the income model settings, the
//! readiness series, and the analytics summary as JSON.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use opt_node_lib::{Node, NodeConfig};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub node: Arc<Node>,
}

/// Optionality Tracker server.
#[derive(Parser, Debug)]
#[command(
    name = "opt-server",
    version,
    about = "Readiness scoring and rolling analytics over logged actions and exposures"
)]
struct Args {
    /// TOML config file (values are overridden by OPT_* variables and flags)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for the event store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep events in memory only
    #[arg(long)]
    in_memory: bool,

    /// HTTP bind address
    #[arg(long)]
    http_bind: Option<String>,

    /// HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Days covered by queries that give no start date
    #[arg(long)]
    default_range_days: Option<u32>,

    /// Origin allowed by CORS
    #[arg(long)]
    cors_origin: Option<String>,
}

impl Args {
    /// Load the layered config and apply command-line overrides.
    fn into_config(self) -> Result<(NodeConfig, String)> {
        let mut config = NodeConfig::load(self.config.as_deref())?;

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        config.in_memory |= self.in_memory;
        if let Some(bind) = self.http_bind {
            config.http_bind = bind;
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(days) = self.default_range_days {
            config.default_range_days = days.max(1);
        }
        if let Some(origin) = self.cors_origin {
            config.cors_origin = origin;
        }

        Ok((config, self.log_format))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, log_format) = Args::parse().into_config()?;

    init_logging(&config.log_level, &log_format);

    info!("Optionality Tracker v{}", env!("CARGO_PKG_VERSION"));
    info!(
        data_dir = %config.data_dir.display(),
        in_memory = config.in_memory,
        http = %config.http_addr(),
        "starting"
    );

    let node = match Node::new(config.clone()) {
        Ok(n) => n,
        Err(e) => {
            error!("failed to open store: {}", e);
            return Err(e.into());
        }
    };

    let app = routes::router(AppState { node });
    let listener = tokio::net::TcpListener::bind(config.http_addr()).await?;
    info!("listening on http://{}", config.http_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down..."),
        Err(e) => error!("failed to listen for Ctrl+C: {}", e),
    }
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
