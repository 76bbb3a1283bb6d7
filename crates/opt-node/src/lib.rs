//! # opt-node-lib: Storage, settings, and query composition.
//!
//! Composes the computation crates into a running service:
//! - [`storage::MemoryStore`]: event and settings store with optional JSON snapshot
//! - [`settings::SettingsProvider`]: validated access to the settings record
//! - [`service::QueryService`]: range resolution, lookback fetch, and rounding
//! - [`node::Node`]: wiring from a [`config::NodeConfig`]

pub mod config;
pub mod node;
pub mod presentation;
pub mod service;
pub mod settings;
pub mod storage;

pub use config::NodeConfig;
pub use node::{Node, NodeQueries};
pub use service::{IncomeSeriesResponse, QueryService, explanations};
pub use settings::SettingsProvider;
pub use storage::{ListQuery, MemoryStore};
