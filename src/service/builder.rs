//! Builder for constructing a [`SecurityService`].

use crate::config::{ConfigError, SecurityConfig};
use crate::core::TransitionTable;
use crate::detector::CatDetector;
use crate::listener::StatusListener;
use crate::service::SecurityService;
use crate::store::SensorStore;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building a service.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Sensor store not specified. Call .store(store) before .build()")]
    MissingStore,

    #[error("Cat detector not specified. Call .detector(detector) before .build()")]
    MissingDetector,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Builder for constructing a service with a fluent API.
pub struct SecurityServiceBuilder<St, D> {
    store: Option<St>,
    detector: Option<D>,
    config: SecurityConfig,
    table: TransitionTable,
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl<St: SensorStore, D: CatDetector> SecurityServiceBuilder<St, D> {
    pub fn new() -> Self {
        Self {
            store: None,
            detector: None,
            config: SecurityConfig::default(),
            table: TransitionTable::standard(),
            listeners: Vec::new(),
        }
    }

    /// Set the sensor store (required).
    pub fn store(mut self, store: St) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the cat detector (required).
    pub fn detector(mut self, detector: D) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Replace the default configuration. Validated in `build`.
    pub fn config(mut self, config: SecurityConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard transition table.
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = table;
        self
    }

    /// Register a listener up front.
    pub fn listener(mut self, listener: Arc<dyn StatusListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Build the service.
    /// Returns an error if a collaborator is missing or the config is invalid.
    pub fn build(self) -> Result<SecurityService<St, D>, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        let detector = self.detector.ok_or(BuildError::MissingDetector)?;
        let config = self.config.validated()?;

        let mut service = SecurityService::from_parts(store, detector, config, self.table);
        for listener in self.listeners {
            service.add_status_listener(listener);
        }

        Ok(service)
    }
}

impl<St: SensorStore, D: CatDetector> Default for SecurityServiceBuilder<St, D> {
    fn default() -> Self {
        Self::new()
    }
}
