//! Request types for the daily calculation API.
//!
//! This module defines the JSON request structures for the `/calculate/day`
//! and `/calculate/range` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for the `/calculate/day` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateDayRequest {
    /// Tenant the employee belongs to.
    pub tenant_id: Uuid,
    /// Employee to calculate.
    pub employee_id: Uuid,
    /// Day to calculate.
    pub date: NaiveDate,
}

/// Request body for the `/calculate/range` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRangeRequest {
    /// Tenant the employee belongs to.
    pub tenant_id: Uuid,
    /// Employee to recalculate.
    pub employee_id: Uuid,
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}
