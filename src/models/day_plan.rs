//! Day plan model: the rule-set governing one category of workday.
//!
//! Day plans are administrator configuration. They are loaded from YAML by
//! the [`ConfigLoader`](crate::config::ConfigLoader) and referenced by
//! per-employee assignments.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::booking::MINUTES_PER_DAY;

/// How a boundary time is rounded after tolerance absorption.
///
/// Exactly one mode is active and each mode carries only its own parameter.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Rounding;
///
/// let rounding: Rounding = serde_yaml::from_str("mode: nearest\ninterval: 15").unwrap();
/// assert_eq!(rounding, Rounding::Nearest { interval: 15 });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Rounding {
    /// Leave the time unchanged.
    #[default]
    None,
    /// Round up to the next multiple of `interval`.
    Up {
        /// Interval in minutes.
        interval: i32,
    },
    /// Round down to the previous multiple of `interval`.
    Down {
        /// Interval in minutes.
        interval: i32,
    },
    /// Round to the nearest multiple of `interval`; halves round up.
    Nearest {
        /// Interval in minutes.
        interval: i32,
    },
    /// Add a fixed offset (e.g. walk time to the workstation).
    AddFixed {
        /// Offset in minutes.
        offset: i32,
    },
    /// Subtract a fixed offset, never below midnight.
    SubtractFixed {
        /// Offset in minutes.
        offset: i32,
    },
}

/// Grace bands around the scheduled arrival and departure.
///
/// A value of zero disables absorption on that edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Minutes a late arrival is still treated as on time.
    pub come_plus: i32,
    /// Minutes an early arrival is still treated as on time.
    pub come_minus: i32,
    /// Minutes a late departure is still treated as on time.
    pub go_plus: i32,
    /// Minutes an early departure is still treated as on time.
    pub go_minus: i32,
}

/// When a break rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakKind {
    /// A clock-time window; the overlap with worked time is deducted.
    Fixed {
        /// Window start, minutes since midnight.
        start: i32,
        /// Window end, minutes since midnight.
        end: i32,
    },
    /// Deducted automatically after `after_work` minutes when no break was booked.
    Variable {
        /// Worked minutes that trigger the deduction.
        after_work: i32,
    },
    /// Tops booked breaks up to the rule's duration after `after_work` minutes.
    Minimum {
        /// Worked minutes that trigger the top-up.
        after_work: i32,
    },
}

/// One break deduction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// When the rule applies.
    #[serde(flatten)]
    pub kind: BreakKind,
    /// Break length in minutes.
    pub duration: i32,
    /// Paid breaks are reported as break time but stay in net time.
    #[serde(default)]
    pub is_paid: bool,
}

/// What to do with a working day that has a target but no bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoBookingBehavior {
    /// Flag the day with `NO_BOOKINGS`.
    #[default]
    Error,
    /// Credit the target time.
    CreditTarget,
    /// Credit nothing; the target becomes undertime.
    CreditZero,
    /// Credit from an approved absence.
    UseAbsence,
    /// Produce no daily value at all.
    Skip,
}

/// How a holiday without bookings is credited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCreditPolicy {
    /// Credit the plan's target time.
    #[default]
    TargetTime,
    /// Credit nothing and owe nothing.
    Zero,
    /// Credit an average of recent days; falls back to target time.
    Average,
}

/// How a shift crossing midnight is attributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayChangePolicy {
    /// All time belongs to the day the shift began.
    #[default]
    ToFirst,
    /// Proportional split across both days; falls back to `to_first`.
    Split,
    /// All time belongs to the second day; falls back to `to_first`.
    ToSecond,
}

/// The rule-set controlling calculation for a category of workday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Unique code of the plan.
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Target minutes for the day.
    pub regular_minutes: i32,
    /// Scheduled arrival; earliest allowed arrival.
    #[serde(default)]
    pub come_from: Option<i32>,
    /// Latest allowed arrival.
    #[serde(default)]
    pub come_to: Option<i32>,
    /// Scheduled departure; earliest allowed departure.
    #[serde(default)]
    pub go_from: Option<i32>,
    /// Latest allowed departure.
    #[serde(default)]
    pub go_to: Option<i32>,
    /// Start of mandatory presence.
    #[serde(default)]
    pub core_start: Option<i32>,
    /// End of mandatory presence.
    #[serde(default)]
    pub core_end: Option<i32>,
    /// Minimum net work expected on a worked day.
    #[serde(default)]
    pub min_work_time: Option<i32>,
    /// Maximum creditable net work.
    #[serde(default)]
    pub max_net_work_time: Option<i32>,
    /// Tolerance bands.
    #[serde(default)]
    pub tolerance: Tolerance,
    /// Rounding for arrivals.
    #[serde(default)]
    pub come_rounding: Rounding,
    /// Rounding for departures.
    #[serde(default)]
    pub go_rounding: Rounding,
    /// Break deduction rules, applied in order.
    #[serde(default)]
    pub breaks: Vec<BreakRule>,
    /// Policy for a working day without bookings.
    #[serde(default)]
    pub no_booking_behavior: NoBookingBehavior,
    /// Policy for a holiday without bookings.
    #[serde(default)]
    pub holiday_credit: HolidayCreditPolicy,
    /// Attribution of shifts crossing midnight.
    #[serde(default)]
    pub day_change: DayChangePolicy,
}

impl DayPlan {
    /// Creates a plan with only a target; every other rule is at its default.
    pub fn new(code: impl Into<String>, regular_minutes: i32) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            regular_minutes,
            come_from: None,
            come_to: None,
            go_from: None,
            go_to: None,
            core_start: None,
            core_end: None,
            min_work_time: None,
            max_net_work_time: None,
            tolerance: Tolerance::default(),
            come_rounding: Rounding::None,
            go_rounding: Rounding::None,
            breaks: Vec::new(),
            no_booking_behavior: NoBookingBehavior::default(),
            holiday_credit: HolidayCreditPolicy::default(),
            day_change: DayChangePolicy::default(),
        }
    }

    /// Checks the plan for internally inconsistent values.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DayPlan;
    ///
    /// let mut plan = DayPlan::new("std", 480);
    /// plan.come_from = Some(540);
    /// plan.come_to = Some(480);
    /// assert!(plan.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidDayPlan {
            code: self.code.clone(),
            message,
        };

        if self.regular_minutes < 0 {
            return Err(invalid("regular_minutes must not be negative".to_string()));
        }

        let clock_fields = [
            ("come_from", self.come_from),
            ("come_to", self.come_to),
            ("go_from", self.go_from),
            ("go_to", self.go_to),
            ("core_start", self.core_start),
            ("core_end", self.core_end),
        ];
        for (field, value) in clock_fields {
            if let Some(minutes) = value {
                if !(0..MINUTES_PER_DAY).contains(&minutes) {
                    return Err(invalid(format!("{} {} is outside 0..=1439", field, minutes)));
                }
            }
        }

        let ordered = [
            ("come_from", self.come_from, "come_to", self.come_to),
            ("go_from", self.go_from, "go_to", self.go_to),
        ];
        for (lo_name, lo, hi_name, hi) in ordered {
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo > hi {
                    return Err(invalid(format!("{} is after {}", lo_name, hi_name)));
                }
            }
        }
        if let (Some(start), Some(end)) = (self.core_start, self.core_end) {
            if start >= end {
                return Err(invalid("core_start must be before core_end".to_string()));
            }
        }

        let t = &self.tolerance;
        if t.come_plus < 0 || t.come_minus < 0 || t.go_plus < 0 || t.go_minus < 0 {
            return Err(invalid("tolerances must not be negative".to_string()));
        }

        for rule in &self.breaks {
            if rule.duration < 0 {
                return Err(invalid("break duration must not be negative".to_string()));
            }
            if let BreakKind::Fixed { start, end } = rule.kind {
                if start >= end {
                    return Err(invalid(format!(
                        "fixed break window {}..{} is empty",
                        start, end
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_day_plan_yaml() {
        let yaml = r#"
code: std_8h
name: Standard 8h
regular_minutes: 480
come_from: 480
come_to: 540
go_from: 960
go_to: 1080
core_start: 540
core_end: 900
tolerance:
  come_minus: 5
  go_plus: 5
come_rounding:
  mode: up
  interval: 15
go_rounding:
  mode: subtract_fixed
  offset: 10
breaks:
  - type: fixed
    start: 720
    end: 750
    duration: 30
  - type: minimum
    after_work: 540
    duration: 45
    is_paid: false
no_booking_behavior: credit_target
holiday_credit: average
"#;
        let plan: DayPlan = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(plan.code, "std_8h");
        assert_eq!(plan.regular_minutes, 480);
        assert_eq!(plan.tolerance.come_minus, 5);
        assert_eq!(plan.tolerance.come_plus, 0);
        assert_eq!(plan.come_rounding, Rounding::Up { interval: 15 });
        assert_eq!(plan.go_rounding, Rounding::SubtractFixed { offset: 10 });
        assert_eq!(plan.breaks.len(), 2);
        assert_eq!(
            plan.breaks[0].kind,
            BreakKind::Fixed {
                start: 720,
                end: 750
            }
        );
        assert!(!plan.breaks[1].is_paid);
        assert_eq!(plan.no_booking_behavior, NoBookingBehavior::CreditTarget);
        assert_eq!(plan.holiday_credit, HolidayCreditPolicy::Average);
        assert_eq!(plan.day_change, DayChangePolicy::ToFirst);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_minimal_day_plan_uses_defaults() {
        let plan: DayPlan = serde_yaml::from_str("code: short\nregular_minutes: 240").unwrap();

        assert_eq!(plan.come_rounding, Rounding::None);
        assert_eq!(plan.tolerance, Tolerance::default());
        assert!(plan.breaks.is_empty());
        assert_eq!(plan.no_booking_behavior, NoBookingBehavior::Error);
        assert_eq!(plan.holiday_credit, HolidayCreditPolicy::TargetTime);
    }

    #[test]
    fn test_rounding_mode_carries_only_its_own_parameter() {
        let yaml = "mode: add_fixed\noffset: 10";
        let rounding: Rounding = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rounding, Rounding::AddFixed { offset: 10 });

        let missing: Result<Rounding, _> = serde_yaml::from_str("mode: nearest\noffset: 10");
        assert!(missing.is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_day_clock_value() {
        let mut plan = DayPlan::new("bad", 480);
        plan.go_to = Some(1440);
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("go_to 1440"));
    }

    #[test]
    fn test_validate_rejects_inverted_core_time() {
        let mut plan = DayPlan::new("bad", 480);
        plan.core_start = Some(900);
        plan.core_end = Some(540);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let mut plan = DayPlan::new("bad", 480);
        plan.tolerance.go_minus = -1;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_fixed_break_window() {
        let mut plan = DayPlan::new("bad", 480);
        plan.breaks.push(BreakRule {
            kind: BreakKind::Fixed {
                start: 720,
                end: 720,
            },
            duration: 30,
            is_paid: false,
        });
        assert!(plan.validate().is_err());
    }
}
