//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::DayPlan;

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// A label for the configuration set.
    pub name: String,
    /// Longest range accepted by a single range recalculation, in days.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
    /// Whether calculated booking times are written back to the booking store.
    #[serde(default = "default_write_back")]
    pub write_back_calculated_times: bool,
}

fn default_max_range_days() -> u32 {
    366
}

fn default_write_back() -> bool {
    true
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_range_days: default_max_range_days(),
            write_back_calculated_times: default_write_back(),
        }
    }
}

/// Day plans keyed by their code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPlanCatalog {
    plans: BTreeMap<String, DayPlan>,
}

impl DayPlanCatalog {
    /// Creates a catalogue from a list of plans; later duplicates replace earlier ones.
    pub fn new(plans: Vec<DayPlan>) -> Self {
        Self {
            plans: plans.into_iter().map(|p| (p.code.clone(), p)).collect(),
        }
    }

    /// Returns the plan with the given code.
    pub fn get(&self, code: &str) -> Option<&DayPlan> {
        self.plans.get(code)
    }

    /// Returns all plan codes in order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    /// Returns all plans ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &DayPlan> {
        self.plans.values()
    }

    /// Returns the number of plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Returns true when the catalogue holds no plans.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
