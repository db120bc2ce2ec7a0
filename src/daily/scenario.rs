//! Scenario resolution for one employee-day.
//!
//! Which path a day takes depends on three facts: whether a day plan is
//! assigned, whether the date is a holiday, and whether any bookings exist.
//! [`resolve_scenario`] turns those facts into a [`DayScenario`] without
//! touching any store.

use crate::models::{DayPlan, HolidayCreditPolicy, NoBookingBehavior};

/// The outcome of dispatching an employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayScenario {
    /// No day plan assigned. Target is zero.
    OffDay {
        /// Whether bookings exist despite the missing assignment.
        has_bookings: bool,
    },
    /// Holiday without bookings; the plan's credit policy applies.
    HolidayCredit(HolidayCreditPolicy),
    /// Holiday with bookings; the calculator runs.
    WorkedOnHoliday,
    /// Regular day without bookings; the plan's no-booking policy applies.
    NoBookings(NoBookingBehavior),
    /// Regular day with bookings; the calculator runs.
    Workday,
}

impl DayScenario {
    /// Returns true when the calculator is invoked for this scenario.
    pub fn runs_calculator(&self) -> bool {
        matches!(self, DayScenario::WorkedOnHoliday | DayScenario::Workday)
    }
}

/// Resolves the scenario for an employee-day.
///
/// # Example
///
/// ```
/// use attendance_engine::daily::{DayScenario, resolve_scenario};
/// use attendance_engine::models::DayPlan;
///
/// let plan = DayPlan::new("std_8h", 480);
/// assert_eq!(resolve_scenario(Some(&plan), false, 4), DayScenario::Workday);
/// assert_eq!(
///     resolve_scenario(None, true, 0),
///     DayScenario::OffDay { has_bookings: false }
/// );
/// ```
pub fn resolve_scenario(
    plan: Option<&DayPlan>,
    is_holiday: bool,
    booking_count: usize,
) -> DayScenario {
    match (plan, is_holiday, booking_count) {
        (None, _, count) => DayScenario::OffDay {
            has_bookings: count > 0,
        },
        (Some(plan), true, 0) => DayScenario::HolidayCredit(plan.holiday_credit),
        (Some(_), true, _) => DayScenario::WorkedOnHoliday,
        (Some(plan), false, 0) => DayScenario::NoBookings(plan.no_booking_behavior),
        (Some(_), false, _) => DayScenario::Workday,
    }
}
