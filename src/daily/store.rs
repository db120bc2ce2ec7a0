//! Store collaborators consumed by the daily calculation.
//!
//! Each trait covers one external source. Implementations own their
//! persistence; the engine only calls these methods and propagates their
//! failures as [`EngineError::Store`](crate::error::EngineError::Store).

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Absence, Booking, DailyValue, EmployeeDayPlan, Holiday};

/// Source of bookings and sink for calculated booking times.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Returns the bookings of an employee on a date, ordered by edited time.
    async fn bookings_for_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Vec<Booking>>;

    /// Writes calculated times as one batch, keyed by booking id.
    async fn write_calculated_times(&self, times: &BTreeMap<Uuid, i32>) -> EngineResult<()>;
}

/// Source of day plan assignments.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Returns the assignment for an employee on a date; `None` is an off day.
    async fn assignment_for_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<EmployeeDayPlan>>;
}

/// Source of tenant holidays.
#[async_trait]
pub trait HolidayStore: Send + Sync {
    /// Returns the holiday on a date, if any.
    async fn holiday_on(&self, tenant_id: Uuid, date: NaiveDate) -> EngineResult<Option<Holiday>>;

    /// Returns true when the date is a holiday for the tenant.
    async fn is_holiday(&self, tenant_id: Uuid, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.holiday_on(tenant_id, date).await?.is_some())
    }
}

/// Store of calculated daily values, unique on employee and date.
#[async_trait]
pub trait DailyValueStore: Send + Sync {
    /// Inserts or fully replaces the value for its employee and date.
    async fn upsert(&self, value: &DailyValue) -> EngineResult<()>;

    /// Returns the stored value for an employee on a date.
    async fn get_by_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<DailyValue>>;
}

/// Source of approved absences. Optional for the engine.
#[async_trait]
pub trait AbsenceStore: Send + Sync {
    /// Returns the approved absence of an employee on a date, if any.
    async fn approved_absence(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<Absence>>;
}
