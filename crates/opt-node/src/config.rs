//! Node configuration for the Optionality Tracker server.
//!
//! [`NodeConfig`] carries process settings only: where the event store lives,
//! where the HTTP server binds, and logging. The readiness model parameters
//! are the persisted [`Settings`](opt_core::types::Settings) record, not
//! configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `OPT_`-prefixed environment variables (`OPT_HTTP_PORT=9000`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use opt_core::constants::DEFAULT_RANGE_DAYS;
use opt_core::error::OptError;

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Origin of the bundled web client in development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "OPT";

/// Configuration for a server instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// Root directory for persistent data.
    pub data_dir: PathBuf,
    /// Keep events in memory only; nothing is written to `data_dir`.
    pub in_memory: bool,
    /// IP address for the HTTP server to bind to.
    pub http_bind: String,
    /// Port for the HTTP server.
    pub http_port: u16,
    /// Log level filter string (e.g. "info", "debug", "opt_node_lib=trace").
    pub log_level: String,
    /// Days covered by a series or summary query that names no start date.
    pub default_range_days: u32,
    /// Origin allowed by the CORS layer.
    pub cors_origin: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("optionality");

        Self {
            data_dir,
            in_memory: false,
            http_bind: "127.0.0.1".to_string(),
            http_port: DEFAULT_HTTP_PORT,
            log_level: "info".to_string(),
            default_range_days: DEFAULT_RANGE_DAYS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment, in increasing order of precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, OptError> {
        Self::build(path).map_err(|e| OptError::Config(e.to_string()))
    }

    fn build(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("in_memory", defaults.in_memory)?
            .set_default("http_bind", defaults.http_bind)?
            .set_default("http_port", i64::from(defaults.http_port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("default_range_days", i64::from(defaults.default_range_days))?
            .set_default("cors_origin", defaults.cors_origin)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let cfg: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        if cfg.default_range_days == 0 {
            return Err(ConfigError::Message(
                "default_range_days must be >= 1".to_string(),
            ));
        }
        Ok(cfg)
    }

    /// Path of the JSON event snapshot.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    /// Socket address string for the HTTP server.
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_bind, self.http_port)
    }
}
