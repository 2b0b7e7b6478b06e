//! Application state for the Attendance Engine API.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::store::AttendanceStore;

/// Shared application state.
///
/// Holds the loaded configuration and the attendance store shared by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    store: Arc<AttendanceStore>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(config, AttendanceStore::new())
    }

    /// Creates a new application state around an existing store.
    pub fn with_store(config: EngineConfig, store: AttendanceStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the attendance store.
    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }
}
