//! Node composition.
//!
//! [`Node`] wires the event store, the settings provider, and the query
//! service together from a [`NodeConfig`]. The HTTP layer holds it behind an
//! `Arc` and calls into it from every handler.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use opt_core::error::OptError;
use opt_model::ReadinessEngine;

use crate::config::NodeConfig;
use crate::service::QueryService;
use crate::settings::SettingsProvider;
use crate::storage::MemoryStore;

/// Query service over the node's own store.
pub type NodeQueries = QueryService<MemoryStore, MemoryStore, ReadinessEngine>;

pub struct Node {
    store: Arc<MemoryStore>,
    queries: NodeQueries,
    config: NodeConfig,
}

impl Node {
    /// Open the configured store and build the services on top of it.
    pub fn new(config: NodeConfig) -> Result<Arc<Self>, OptError> {
        let store = if config.in_memory {
            MemoryStore::new()
        } else {
            MemoryStore::open(config.store_path())?
        };
        let node = Self::with_store(config, Arc::new(store));
        info!(
            persistent = node.store.is_persistent(),
            default_range_days = node.config.default_range_days,
            "node ready"
        );
        Ok(Arc::new(node))
    }

    /// Build a node over an existing store.
    pub fn with_store(config: NodeConfig, store: Arc<MemoryStore>) -> Self {
        let queries = QueryService::new(
            Arc::clone(&store),
            SettingsProvider::new(Arc::clone(&store)),
            ReadinessEngine::new(),
        )
        .with_default_range_days(config.default_range_days);
        Self {
            store,
            queries,
            config,
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn queries(&self) -> &NodeQueries {
        &self.queries
    }

    pub fn settings(&self) -> &SettingsProvider<MemoryStore> {
        self.queries.settings()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Today's date in the server's local time zone.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
