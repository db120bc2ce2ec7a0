//! Error types for the attendance engine.
//!
//! Only infrastructure and configuration failures are errors. Data-level
//! anomalies in a day's bookings are reported in-band on the
//! [`DailyValue`](crate::models::DailyValue) as error and warning codes.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::DayPlanNotFound {
///     code: "std_8h".to_string(),
/// };
/// assert_eq!(error.to_string(), "Day plan not found: std_8h");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Day plan code was not found in the catalogue.
    #[error("Day plan not found: {code}")]
    DayPlanNotFound {
        /// The day plan code that was not found.
        code: String,
    },

    /// A day plan contained inconsistent values.
    #[error("Invalid day plan '{code}': {message}")]
    InvalidDayPlan {
        /// The code of the invalid day plan.
        code: String,
        /// A description of what made the day plan invalid.
        message: String,
    },

    /// A recalculation range ended before it started.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// First date of the range.
        from: NaiveDate,
        /// Last date of the range.
        to: NaiveDate,
    },

    /// A recalculation range exceeded the configured maximum.
    #[error("Date range of {days} days exceeds the maximum of {max}")]
    RangeTooLarge {
        /// Number of days requested.
        days: i64,
        /// Configured maximum.
        max: u32,
    },

    /// An external store call failed.
    #[error("Store operation '{operation}' failed: {message}")]
    Store {
        /// The store operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Store`] for the named operation.
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
