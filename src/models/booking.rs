//! Booking model and related types.
//!
//! A booking is one captured clock event for an employee on a date. Times
//! are minutes since midnight of the booking's date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Whether a booking opens or closes an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingDirection {
    /// Arrival ("come").
    In,
    /// Departure ("go").
    Out,
}

/// Whether a booking bounds work time or a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingCategory {
    /// Work boundary.
    Work,
    /// Break boundary.
    Break,
}

/// One raw or corrected clock event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// Tenant owning the booking.
    pub tenant_id: Uuid,
    /// Employee the booking belongs to.
    pub employee_id: Uuid,
    /// Calendar date of the booking.
    pub date: NaiveDate,
    /// Arrival or departure.
    pub direction: BookingDirection,
    /// Work or break boundary.
    pub category: BookingCategory,
    /// Time as originally captured by the terminal.
    pub original_time: i32,
    /// Corrected time; the calculation always reads this one.
    pub edited_time: i32,
    /// Adjusted time written back after a calculation run.
    #[serde(default)]
    pub calculated_time: Option<i32>,
    /// Booking this one is explicitly paired with.
    #[serde(default)]
    pub pair_id: Option<Uuid>,
}

impl Booking {
    /// Creates an unedited booking where the edited time equals the captured time.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{Booking, BookingCategory, BookingDirection};
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let booking = Booking::new(
    ///     Uuid::new_v4(),
    ///     Uuid::new_v4(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     BookingDirection::In,
    ///     BookingCategory::Work,
    ///     480,
    /// );
    /// assert_eq!(booking.edited_time, 480);
    /// assert!(booking.calculated_time.is_none());
    /// ```
    pub fn new(
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
        direction: BookingDirection,
        category: BookingCategory,
        time: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            employee_id,
            date,
            direction,
            category,
            original_time: time,
            edited_time: time,
            calculated_time: None,
            pair_id: None,
        }
    }

    /// Returns true for a work-category arrival.
    pub fn is_work_in(&self) -> bool {
        self.direction == BookingDirection::In && self.category == BookingCategory::Work
    }

    /// Returns true for a work-category departure.
    pub fn is_work_out(&self) -> bool {
        self.direction == BookingDirection::Out && self.category == BookingCategory::Work
    }
}

/// Formats minutes since midnight as `HH:MM`, with a `+1` suffix past midnight.
///
/// ```
/// use attendance_engine::models::format_minutes;
///
/// assert_eq!(format_minutes(485), "08:05");
/// assert_eq!(format_minutes(1500), "01:00+1");
/// ```
pub fn format_minutes(minutes: i32) -> String {
    let day = minutes.div_euclid(MINUTES_PER_DAY);
    let rest = minutes.rem_euclid(MINUTES_PER_DAY);
    let base = format!("{:02}:{:02}", rest / 60, rest % 60);
    match day {
        0 => base,
        d if d > 0 => format!("{}+{}", base, d),
        d => format!("{}{}", base, d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_booking_deserialization_defaults_optional_fields() {
        let json = r#"{
            "id": "6f1c2b7a-1d0e-4a55-9b9e-0d3c1f4e2a10",
            "tenant_id": "00000000-0000-0000-0000-000000000001",
            "employee_id": "00000000-0000-0000-0000-000000000002",
            "date": "2026-03-02",
            "direction": "in",
            "category": "work",
            "original_time": 478,
            "edited_time": 480
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.date, make_date("2026-03-02"));
        assert_eq!(booking.direction, BookingDirection::In);
        assert_eq!(booking.original_time, 478);
        assert_eq!(booking.edited_time, 480);
        assert!(booking.calculated_time.is_none());
        assert!(booking.pair_id.is_none());
        assert!(booking.is_work_in());
    }

    #[test]
    fn test_direction_and_category_predicates() {
        let tenant = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let date = make_date("2026-03-02");

        let out = Booking::new(
            tenant,
            employee,
            date,
            BookingDirection::Out,
            BookingCategory::Work,
            960,
        );
        assert!(out.is_work_out());
        assert!(!out.is_work_in());

        let break_in = Booking::new(
            tenant,
            employee,
            date,
            BookingDirection::In,
            BookingCategory::Break,
            720,
        );
        assert!(!break_in.is_work_in());
        assert!(!break_in.is_work_out());
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(1439), "23:59");
        assert_eq!(format_minutes(1440), "00:00+1");
        assert_eq!(format_minutes(-30), "23:30-1");
    }
}
