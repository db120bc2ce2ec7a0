//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and the day plan catalogue from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::DayPlan;

use super::types::{DayPlanCatalog, EngineSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml        # Engine settings
/// └── day_plans/
///     ├── std_8h.yaml    # One day plan per file
///     └── flex_38h.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let plan = loader.get_day_plan("std_8h").unwrap();
/// println!("Target: {} minutes", plan.regular_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    catalog: DayPlanCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, any file contains
    /// invalid YAML, or any day plan fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let plans = Self::load_day_plans(&path.join("day_plans"))?;

        debug!(
            config = %settings.name,
            day_plans = plans.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            settings,
            catalog: DayPlanCatalog::new(plans),
        })
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(settings: EngineSettings, plans: Vec<DayPlan>) -> EngineResult<Self> {
        for plan in &plans {
            plan.validate()?;
        }
        Ok(Self {
            settings,
            catalog: DayPlanCatalog::new(plans),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates every day plan in the directory.
    fn load_day_plans(plans_dir: &Path) -> EngineResult<Vec<DayPlan>> {
        let plans_dir_str = plans_dir.display().to_string();

        let entries = fs::read_dir(plans_dir).map_err(|_| EngineError::ConfigNotFound {
            path: plans_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: plans_dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut plans = Vec::with_capacity(paths.len());
        for path in paths {
            let plan = Self::load_yaml::<DayPlan>(&path)?;
            plan.validate()?;
            plans.push(plan);
        }

        if plans.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no day plan files found)", plans_dir_str),
            });
        }

        Ok(plans)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the day plan catalogue.
    pub fn catalog(&self) -> &DayPlanCatalog {
        &self.catalog
    }

    /// Gets a day plan by its code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let plan = loader.get_day_plan("flex_38h")?;
    /// println!("Core time starts at {:?}", plan.core_start);
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn get_day_plan(&self, code: &str) -> EngineResult<&DayPlan> {
        self.catalog
            .get(code)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                code: code.to_string(),
            })
    }
}
