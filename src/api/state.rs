//! Application state for the daily calculation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::daily::DailyCalcService;

/// Shared application state.
///
/// Holds the loaded configuration and the calculation service wired to
/// its stores.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The daily calculation service.
    service: Arc<DailyCalcService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, service: DailyCalcService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the calculation service.
    pub fn service(&self) -> &DailyCalcService {
        &self.service
    }
}
