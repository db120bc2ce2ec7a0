//! Machine-readable error and warning codes attached to a daily result.
//!
//! Error codes mark a day whose figures are unreliable and need human
//! correction. Warning codes are informational.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition that makes the day's figures unreliable.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ErrorCode;
///
/// assert_eq!(ErrorCode::NoBookings.to_string(), "NO_BOOKINGS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A day with a target but no bookings, under the `error` policy.
    NoBookings,
    /// A work departure without a matching arrival.
    MissingCome,
    /// A work arrival without a matching departure.
    MissingGo,
    /// A break boundary without its counterpart.
    UnpairedBreak,
    /// A booking time outside the representable range.
    InvalidTime,
    /// The first arrival was after the start of core time.
    MissedCoreStart,
    /// The last departure was before the end of core time.
    MissedCoreEnd,
}

impl ErrorCode {
    /// Returns the wire string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoBookings => "NO_BOOKINGS",
            ErrorCode::MissingCome => "MISSING_COME",
            ErrorCode::MissingGo => "MISSING_GO",
            ErrorCode::UnpairedBreak => "UNPAIRED_BREAK",
            ErrorCode::InvalidTime => "INVALID_TIME",
            ErrorCode::MissedCoreStart => "MISSED_CORE_START",
            ErrorCode::MissedCoreEnd => "MISSED_CORE_END",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An informational condition on the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// The day is a holiday and was credited without bookings.
    Holiday,
    /// Bookings exist on a holiday.
    WorkedOnHoliday,
    /// No day plan is assigned.
    OffDay,
    /// Bookings exist although no day plan is assigned.
    BookingsOnOffDay,
    /// Average-based holiday credit fell back to target credit.
    AverageNotImplemented,
    /// No absence source is wired in; fell back to the error policy.
    AbsenceNotImplemented,
    /// An approved absence supplied the day's credit.
    AbsenceCredited,
    /// A no-booking policy credited the day.
    NoBookingsCredited,
    /// A shift crossed midnight and was attributed to its first day.
    CrossMidnight,
    /// A configured day-change policy fell back to `to_first`.
    DayChangeNotImplemented,
    /// Arrival before the allowed arrival window.
    EarlyCome,
    /// Arrival after the allowed arrival window.
    LateCome,
    /// Departure before the allowed departure window.
    EarlyGo,
    /// Departure after the allowed departure window.
    LateGo,
    /// Net time was capped at the plan's maximum.
    MaxTimeReached,
    /// Net time is below the plan's minimum.
    BelowMinWorkTime,
    /// An automatic break deduction was applied.
    AutoBreakApplied,
}

impl WarningCode {
    /// Returns the wire string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::Holiday => "HOLIDAY",
            WarningCode::WorkedOnHoliday => "WORKED_ON_HOLIDAY",
            WarningCode::OffDay => "OFF_DAY",
            WarningCode::BookingsOnOffDay => "BOOKINGS_ON_OFF_DAY",
            WarningCode::AverageNotImplemented => "AVERAGE_NOT_IMPLEMENTED",
            WarningCode::AbsenceNotImplemented => "ABSENCE_NOT_IMPLEMENTED",
            WarningCode::AbsenceCredited => "ABSENCE_CREDITED",
            WarningCode::NoBookingsCredited => "NO_BOOKINGS_CREDITED",
            WarningCode::CrossMidnight => "CROSS_MIDNIGHT",
            WarningCode::DayChangeNotImplemented => "DAY_CHANGE_NOT_IMPLEMENTED",
            WarningCode::EarlyCome => "EARLY_COME",
            WarningCode::LateCome => "LATE_COME",
            WarningCode::EarlyGo => "EARLY_GO",
            WarningCode::LateGo => "LATE_GO",
            WarningCode::MaxTimeReached => "MAX_TIME_REACHED",
            WarningCode::BelowMinWorkTime => "BELOW_MIN_WORK_TIME",
            WarningCode::AutoBreakApplied => "AUTO_BREAK_APPLIED",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
