//! The persisted result of one employee-day calculation.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ErrorCode, WarningCode};

/// The calculation result for one employee-day.
///
/// Upserted as a whole, keyed by employee and date; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyValue {
    /// Unique identifier of the row.
    pub id: Uuid,
    /// Tenant owning the row.
    pub tenant_id: Uuid,
    /// Employee the day belongs to.
    pub employee_id: Uuid,
    /// The calendar day.
    pub value_date: NaiveDate,
    /// Paired work time before breaks, in minutes.
    pub gross_time: i32,
    /// Gross time minus unpaid breaks, in minutes.
    pub net_time: i32,
    /// Target minutes for the day.
    pub target_time: i32,
    /// Minutes of net time above target.
    pub overtime: i32,
    /// Minutes of net time below target.
    pub undertime: i32,
    /// Total break minutes, paid and unpaid.
    pub break_time: i32,
    /// Whether any error code is present.
    pub has_error: bool,
    /// Conditions that make the figures unreliable.
    pub error_codes: BTreeSet<ErrorCode>,
    /// Informational conditions.
    pub warnings: BTreeSet<WarningCode>,
    /// First arrival after tolerance and rounding.
    pub first_come: Option<i32>,
    /// Last departure after tolerance and rounding.
    pub last_go: Option<i32>,
    /// Number of bookings considered for the day.
    pub booking_count: u32,
    /// When the value was calculated.
    pub calculated_at: DateTime<Utc>,
    /// Incremented on every recalculation of the same day.
    pub calculation_version: u64,
}

impl DailyValue {
    /// Returns the net time in decimal hours.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::minutes_to_hours;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(minutes_to_hours(450), Decimal::new(75, 1));
    /// ```
    pub fn net_hours(&self) -> Decimal {
        minutes_to_hours(self.net_time)
    }

    /// Returns the overtime in decimal hours.
    pub fn overtime_hours(&self) -> Decimal {
        minutes_to_hours(self.overtime)
    }

    /// Returns the undertime in decimal hours.
    pub fn undertime_hours(&self) -> Decimal {
        minutes_to_hours(self.undertime)
    }

    /// Returns the day's balance (overtime minus undertime) in minutes.
    pub fn balance(&self) -> i32 {
        self.overtime - self.undertime
    }
}

/// Converts minutes into decimal hours, rounded to two places.
pub fn minutes_to_hours(minutes: i32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}
