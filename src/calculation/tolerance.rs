//! Tolerance absorption and arrival/departure window checks.
//!
//! The scheduled arrival is the plan's `come_from` and the scheduled
//! departure its `go_from`. A boundary inside the tolerance band around
//! its reference snaps onto the reference.
//!
//! A departure borrowed from the next day (at or past 1440) is compared
//! with the departure references of a night plan shifted into the same
//! frame. A night plan is one whose departure window opens before its
//! arrival window.

use crate::models::{DayPlan, MINUTES_PER_DAY, WarningCode};

/// Snaps an arrival onto the scheduled arrival when within tolerance.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::apply_come_tolerance;
/// use attendance_engine::models::DayPlan;
///
/// let mut plan = DayPlan::new("std", 480);
/// plan.come_from = Some(480);
/// plan.tolerance.come_minus = 5;
///
/// assert_eq!(apply_come_tolerance(476, &plan), 480); // 07:56 -> 08:00
/// assert_eq!(apply_come_tolerance(470, &plan), 470); // 07:50 stays early
/// ```
pub fn apply_come_tolerance(time: i32, plan: &DayPlan) -> i32 {
    match plan.come_from {
        Some(scheduled) => absorb(
            time,
            scheduled,
            plan.tolerance.come_minus,
            plan.tolerance.come_plus,
        ),
        None => time,
    }
}

/// Snaps a departure onto the scheduled departure when within tolerance.
///
/// ```
/// use attendance_engine::calculation::apply_go_tolerance;
/// use attendance_engine::models::DayPlan;
///
/// let mut plan = DayPlan::new("night", 420);
/// plan.come_from = Some(1320);
/// plan.go_from = Some(330);
/// plan.tolerance.go_plus = 5;
///
/// assert_eq!(apply_go_tolerance(1440 + 333, &plan), 1440 + 330);
/// ```
pub fn apply_go_tolerance(time: i32, plan: &DayPlan) -> i32 {
    match plan.go_from {
        Some(scheduled) => absorb(
            time,
            scheduled + go_frame(time, plan),
            plan.tolerance.go_minus,
            plan.tolerance.go_plus,
        ),
        None => time,
    }
}

/// Offset that moves a night plan's departure references next to `time`.
fn go_frame(time: i32, plan: &DayPlan) -> i32 {
    let go_start = plan.go_from.or(plan.go_to);
    let come_start = plan.come_from.or(plan.come_to);
    match (go_start, come_start) {
        (Some(go), Some(come)) if time >= MINUTES_PER_DAY && go < come => MINUTES_PER_DAY,
        _ => 0,
    }
}

fn absorb(time: i32, scheduled: i32, early_band: i32, late_band: i32) -> i32 {
    if time < scheduled && early_band > 0 && scheduled - time <= early_band {
        scheduled
    } else if time > scheduled && late_band > 0 && time - scheduled <= late_band {
        scheduled
    } else {
        time
    }
}

/// Checks the day's first arrival against the allowed arrival window.
pub fn check_come_window(time: i32, plan: &DayPlan) -> Option<WarningCode> {
    match (plan.come_from, plan.come_to) {
        (Some(from), _) if time < from => Some(WarningCode::EarlyCome),
        (_, Some(to)) if time > to => Some(WarningCode::LateCome),
        _ => None,
    }
}

/// Checks the day's last departure against the allowed departure window.
pub fn check_go_window(time: i32, plan: &DayPlan) -> Option<WarningCode> {
    let frame = go_frame(time, plan);
    match (plan.go_from.map(|f| f + frame), plan.go_to.map(|t| t + frame)) {
        (Some(from), _) if time < from => Some(WarningCode::EarlyGo),
        (_, Some(to)) if time > to => Some(WarningCode::LateGo),
        _ => None,
    }
}
