//! Break deduction.
//!
//! Booked breaks are always unpaid. Configured rules are evaluated in order
//! against accumulated gross time, not wall-clock time.

use std::collections::BTreeSet;

use crate::models::{BreakKind, BreakRule, MINUTES_PER_DAY, WarningCode};

/// The result of applying break rules to a day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakDeduction {
    /// Minutes subtracted from gross time.
    pub unpaid_minutes: i32,
    /// Minutes reported as break but kept in net time.
    pub paid_minutes: i32,
    /// Warnings raised by automatic deductions.
    pub warnings: BTreeSet<WarningCode>,
}

impl BreakDeduction {
    /// Returns the day's total break time.
    pub fn total(&self) -> i32 {
        self.unpaid_minutes + self.paid_minutes
    }
}

/// Applies the plan's break rules.
///
/// # Arguments
///
/// * `work_intervals` - Rounded `(arrival, departure)` spans of the day's work pairs
/// * `booked_break` - Minutes of break booked by the employee
/// * `gross` - Accumulated gross work time
/// * `rules` - The plan's break rules
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_breaks;
/// use attendance_engine::models::{BreakKind, BreakRule};
///
/// let rules = [BreakRule {
///     kind: BreakKind::Variable { after_work: 360 },
///     duration: 30,
///     is_paid: false,
/// }];
///
/// let deduction = calculate_breaks(&[(480, 1020)], 0, 540, &rules);
/// assert_eq!(deduction.unpaid_minutes, 30);
/// ```
pub fn calculate_breaks(
    work_intervals: &[(i32, i32)],
    booked_break: i32,
    gross: i32,
    rules: &[BreakRule],
) -> BreakDeduction {
    let mut deduction = BreakDeduction {
        unpaid_minutes: booked_break,
        ..BreakDeduction::default()
    };

    if gross <= 0 {
        return deduction;
    }

    for rule in rules {
        let minutes = match rule.kind {
            BreakKind::Fixed { start, end } => {
                let overlap = window_overlap(work_intervals, start, end);
                if rule.duration > 0 {
                    overlap.min(rule.duration)
                } else {
                    overlap
                }
            }
            BreakKind::Variable { after_work } => {
                if booked_break == 0 && gross >= after_work && rule.duration > 0 {
                    deduction.warnings.insert(WarningCode::AutoBreakApplied);
                    rule.duration
                } else {
                    0
                }
            }
            BreakKind::Minimum { after_work } => {
                let shortfall = (rule.duration - deduction.total()).max(0);
                if gross >= after_work && shortfall > 0 {
                    deduction.warnings.insert(WarningCode::AutoBreakApplied);
                    shortfall
                } else {
                    0
                }
            }
        };

        if rule.is_paid {
            deduction.paid_minutes += minutes;
        } else {
            deduction.unpaid_minutes += minutes;
        }
    }

    deduction
}

/// Minutes of work inside the break window, on the day itself or the
/// following morning of a shift that crosses midnight.
fn window_overlap(work_intervals: &[(i32, i32)], start: i32, end: i32) -> i32 {
    [0, MINUTES_PER_DAY]
        .into_iter()
        .map(|shift| {
            work_intervals
                .iter()
                .map(|&(come, go)| ((end + shift).min(go) - (start + shift).max(come)).max(0))
                .sum::<i32>()
        })
        .sum()
}
