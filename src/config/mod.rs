//! Configuration loading and management for the attendance engine.
//!
//! This module loads engine settings and the day plan catalogue from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} day plans", config.catalog().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayPlanCatalog, EngineSettings};
