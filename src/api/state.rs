//! Application state for the income tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::TaxConfig;
use crate::storage::MonthlyLogStore;

/// Shared application state.
///
/// Holds the tax configuration, loaded once at startup, and the store the
/// monthly log is persisted in.
#[derive(Clone)]
pub struct AppState {
    config: Arc<TaxConfig>,
    store: Arc<dyn MonthlyLogStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: TaxConfig, store: Arc<dyn MonthlyLogStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns the tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the monthly log store.
    pub fn store(&self) -> &dyn MonthlyLogStore {
        self.store.as_ref()
    }
}
