//! Calendar facts resolved per employee-day: plan assignments, holidays and
//! approved absences.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DayPlan;

/// Binds one employee to one day plan on one date.
///
/// No assignment for a date means an off day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDayPlan {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// Tenant owning the assignment.
    pub tenant_id: Uuid,
    /// Assigned employee.
    pub employee_id: Uuid,
    /// Date the assignment is valid for.
    pub date: NaiveDate,
    /// The resolved day plan.
    pub day_plan: DayPlan,
}

/// A tenant-scoped holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Tenant the holiday applies to.
    pub tenant_id: Uuid,
    /// The holiday's date.
    pub date: NaiveDate,
    /// The holiday's name.
    pub name: String,
}

/// How much of the target an absence credits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePortion {
    /// The full target.
    #[default]
    Full,
    /// Half the target, rounded down to the minute.
    Half,
    /// Nothing.
    None,
}

impl AbsencePortion {
    /// Returns the credited minutes for the given target.
    ///
    /// ```
    /// use attendance_engine::models::AbsencePortion;
    ///
    /// assert_eq!(AbsencePortion::Half.credit(481), 240);
    /// ```
    pub fn credit(&self, target: i32) -> i32 {
        match self {
            AbsencePortion::Full => target,
            AbsencePortion::Half => target / 2,
            AbsencePortion::None => 0,
        }
    }
}

/// An approved absence (vacation, sickness, training) for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Unique identifier for the absence day.
    pub id: Uuid,
    /// Absent employee.
    pub employee_id: Uuid,
    /// Date of the absence.
    pub date: NaiveDate,
    /// Absence type code (e.g. "vacation").
    pub code: String,
    /// Portion of the target credited.
    #[serde(default)]
    pub portion: AbsencePortion,
}
