//! Access to the singleton [`Settings`] record.
//!
//! The provider owns validation and the create-on-first-read rule; the
//! underlying [`SettingsStore`] only loads and saves.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use opt_core::error::OptError;
use opt_core::traits::SettingsStore;
use opt_core::types::{Settings, SettingsUpdate};

pub struct SettingsProvider<S> {
    store: Arc<S>,
}

impl<S> Clone for SettingsProvider<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SettingsStore> SettingsProvider<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The stored settings, persisting the defaults on first access.
    pub fn current(&self) -> Result<Settings, OptError> {
        if let Some(settings) = self.store.load_settings()? {
            return Ok(settings);
        }
        let settings = Settings::defaults(Utc::now());
        self.store.store_settings(&settings)?;
        info!(
            half_life_days = settings.half_life_days,
            "created default income model settings"
        );
        Ok(settings)
    }

    /// Validate and persist `update`. On rejection the stored record is
    /// left as it was.
    pub fn update(&self, update: SettingsUpdate) -> Result<Settings, OptError> {
        if let Err(e) = update.validate() {
            warn!(error = %e, "rejected settings update");
            return Err(e.into());
        }
        let mut settings = self.current()?;
        settings.apply(&update, Utc::now());
        self.store.store_settings(&settings)?;
        info!(
            w_s = settings.w_s,
            w_n = settings.w_n,
            w_l = settings.w_l,
            w_e = settings.w_e,
            half_life_days = settings.half_life_days,
            "updated income model settings"
        );
        Ok(settings)
    }
}
