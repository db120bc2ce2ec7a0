//! Core data models for the attendance engine.
//!
//! This module contains the domain models consumed and produced by the
//! daily calculation.

mod assignment;
mod booking;
mod codes;
mod daily_value;
mod day_plan;

pub use assignment::{Absence, AbsencePortion, EmployeeDayPlan, Holiday};
pub use booking::{Booking, BookingCategory, BookingDirection, MINUTES_PER_DAY, format_minutes};
pub use codes::{ErrorCode, WarningCode};
pub use daily_value::{DailyValue, minutes_to_hours};
pub use day_plan::{
    BreakKind, BreakRule, DayChangePolicy, DayPlan, HolidayCreditPolicy, NoBookingBehavior,
    Rounding, Tolerance,
};
