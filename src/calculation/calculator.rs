//! The daily time calculation.
//!
//! Turns one employee-day's bookings and a resolved day plan into gross,
//! net and target time, overtime or undertime, break time and per-booking
//! calculated times. The function is pure and never fails: anomalies become
//! error or warning codes on the result.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BookingCategory, DayPlan, ErrorCode, MINUTES_PER_DAY, WarningCode};

use super::breaks::calculate_breaks;
use super::pairing::{BookingInput, pair_bookings};
use super::rounding::apply_rounding;
use super::tolerance::{
    apply_come_tolerance, apply_go_tolerance, check_come_window, check_go_window,
};

/// The outcome of calculating one employee-day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCalculation {
    /// Paired work time after tolerance and rounding.
    pub gross_time: i32,
    /// Gross time minus unpaid breaks, floored at zero and capped at the plan maximum.
    pub net_time: i32,
    /// The plan's target.
    pub target_time: i32,
    /// Net time above target.
    pub overtime: i32,
    /// Net time below target.
    pub undertime: i32,
    /// Paid and unpaid break minutes.
    pub break_time: i32,
    /// First rounded arrival.
    pub first_come: Option<i32>,
    /// Last rounded departure.
    pub last_go: Option<i32>,
    /// Number of bookings supplied.
    pub booking_count: u32,
    /// Errors that make the figures unreliable.
    pub error_codes: BTreeSet<ErrorCode>,
    /// Informational warnings.
    pub warnings: BTreeSet<WarningCode>,
    /// Rounded time per paired work booking.
    pub calculated_times: BTreeMap<Uuid, i32>,
}

impl DayCalculation {
    /// Returns true when any error code is present.
    pub fn has_error(&self) -> bool {
        !self.error_codes.is_empty()
    }
}

/// Calculates one employee-day.
///
/// # Algorithm
///
/// 1. Pair arrivals with departures per category
/// 2. Absorb tolerances on work boundaries
/// 3. Round work boundaries
/// 4. Sum gross time over work pairs
/// 5. Deduct booked and configured breaks
/// 6. Cap net time and compare it with the target
/// 7. Check arrival/departure windows and core time
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{BookingInput, calculate};
/// use attendance_engine::models::{BookingCategory, BookingDirection, DayPlan};
/// use uuid::Uuid;
///
/// let booking = |time, direction| BookingInput {
///     id: Uuid::new_v4(),
///     time,
///     direction,
///     category: BookingCategory::Work,
///     pair_id: None,
/// };
///
/// let plan = DayPlan::new("std", 480);
/// let result = calculate(
///     &[booking(480, BookingDirection::In), booking(1020, BookingDirection::Out)],
///     &plan,
/// );
///
/// assert_eq!(result.gross_time, 540);
/// assert_eq!(result.overtime, 60);
/// assert_eq!(result.undertime, 0);
/// ```
pub fn calculate(bookings: &[BookingInput], plan: &DayPlan) -> DayCalculation {
    let pairing = pair_bookings(bookings);

    let mut result = DayCalculation {
        target_time: plan.regular_minutes,
        booking_count: bookings.len() as u32,
        error_codes: pairing.error_codes.clone(),
        ..DayCalculation::default()
    };

    let mut work_intervals: Vec<(i32, i32)> = Vec::new();
    let mut first_tolerated_come: Option<i32> = None;
    let mut last_tolerated_go: Option<i32> = None;
    let mut booked_break = 0;

    for pair in &pairing.pairs {
        match pair.category {
            BookingCategory::Work => {
                let come = apply_come_tolerance(pair.arrival.time, plan);
                let go = apply_go_tolerance(pair.departure.time, plan);
                first_tolerated_come = Some(first_tolerated_come.map_or(come, |c| c.min(come)));
                last_tolerated_go = Some(last_tolerated_go.map_or(go, |g| g.max(go)));

                let come = apply_rounding(come, plan.come_rounding);
                let mut go = apply_rounding(go, plan.go_rounding);
                if pair.departure.time >= MINUTES_PER_DAY {
                    // A borrowed departure never ends before its own midnight.
                    go = go.max(MINUTES_PER_DAY);
                    result.warnings.insert(WarningCode::CrossMidnight);
                }
                // Rounding may invert a very short pair.
                let go = go.max(come);

                result.calculated_times.insert(pair.arrival.id, come);
                result.calculated_times.insert(pair.departure.id, go);
                work_intervals.push((come, go));
            }
            BookingCategory::Break => booked_break += pair.duration(),
        }
    }

    result.gross_time = work_intervals.iter().map(|(come, go)| go - come).sum();
    result.first_come = work_intervals.iter().map(|&(come, _)| come).min();
    result.last_go = work_intervals.iter().map(|&(_, go)| go).max();

    let deduction = calculate_breaks(&work_intervals, booked_break, result.gross_time, &plan.breaks);
    result.break_time = deduction.total();
    result.warnings.extend(deduction.warnings.iter().copied());

    let mut net = (result.gross_time - deduction.unpaid_minutes).max(0);
    if let Some(max) = plan.max_net_work_time {
        if net > max {
            net = max;
            result.warnings.insert(WarningCode::MaxTimeReached);
        }
    }
    result.net_time = net;

    if !work_intervals.is_empty() {
        if let Some(min) = plan.min_work_time {
            if net < min {
                result.warnings.insert(WarningCode::BelowMinWorkTime);
            }
        }
    }

    result.overtime = (net - result.target_time).max(0);
    result.undertime = (result.target_time - net).max(0);

    if let Some(come) = first_tolerated_come {
        result.warnings.extend(check_come_window(come, plan));
    }
    if let Some(go) = last_tolerated_go {
        result.warnings.extend(check_go_window(go, plan));
    }

    if let (Some(core_start), Some(core_end), Some(first), Some(last)) =
        (plan.core_start, plan.core_end, result.first_come, result.last_go)
    {
        if first > core_start {
            result.error_codes.insert(ErrorCode::MissedCoreStart);
        }
        if last < core_end {
            result.error_codes.insert(ErrorCode::MissedCoreEnd);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDirection, BreakKind, BreakRule, Rounding};
    use proptest::prelude::*;

    fn input(time: i32, direction: BookingDirection, category: BookingCategory) -> BookingInput {
        BookingInput {
            id: Uuid::new_v4(),
            time,
            direction,
            category,
            pair_id: None,
        }
    }

    fn work_in(time: i32) -> BookingInput {
        input(time, BookingDirection::In, BookingCategory::Work)
    }

    fn work_out(time: i32) -> BookingInput {
        input(time, BookingDirection::Out, BookingCategory::Work)
    }

    fn standard_plan() -> DayPlan {
        let mut plan = DayPlan::new("std_8h", 480);
        plan.come_from = Some(480);
        plan.come_to = Some(540);
        plan.go_from = Some(960);
        plan.go_to = Some(1080);
        plan
    }

    // ==========================================================================
    // CALC-001: exact 8h day
    // ==========================================================================
    #[test]
    fn test_calc_001_exact_target_day() {
        let plan = standard_plan();
        let result = calculate(&[work_in(480), work_out(960)], &plan);

        assert_eq!(result.gross_time, 480);
        assert_eq!(result.net_time, 480);
        assert_eq!(result.target_time, 480);
        assert_eq!(result.overtime, 0);
        assert_eq!(result.undertime, 0);
        assert_eq!(result.first_come, Some(480));
        assert_eq!(result.last_go, Some(960));
        assert_eq!(result.booking_count, 2);
        assert!(!result.has_error());
        assert!(result.warnings.is_empty());
    }

    // ==========================================================================
    // CALC-002: tolerance absorbs an early arrival
    // ==========================================================================
    #[test]
    fn test_calc_002_early_arrival_within_tolerance_is_on_time() {
        let mut plan = standard_plan();
        plan.tolerance.come_minus = 5;
        let arrival = work_in(476);
        let result = calculate(&[arrival, work_out(960)], &plan);

        assert_eq!(result.gross_time, 480);
        assert_eq!(result.first_come, Some(480));
        assert_eq!(result.calculated_times[&arrival.id], 480);
        assert!(!result.warnings.contains(&WarningCode::EarlyCome));
    }

    #[test]
    fn test_calc_003_early_arrival_outside_tolerance_warns() {
        let mut plan = standard_plan();
        plan.tolerance.come_minus = 5;
        let result = calculate(&[work_in(470), work_out(960)], &plan);

        assert_eq!(result.gross_time, 490);
        assert!(result.warnings.contains(&WarningCode::EarlyCome));
    }

    // ==========================================================================
    // CALC-004: rounding after tolerance
    // ==========================================================================
    #[test]
    fn test_calc_004_rounding_applies_to_both_edges() {
        let mut plan = standard_plan();
        plan.come_rounding = Rounding::Up { interval: 15 };
        plan.go_rounding = Rounding::Down { interval: 15 };
        let arrival = work_in(487);
        let departure = work_out(1019);
        let result = calculate(&[arrival, departure], &plan);

        assert_eq!(result.calculated_times[&arrival.id], 495);
        assert_eq!(result.calculated_times[&departure.id], 1005);
        assert_eq!(result.gross_time, 510);
        assert_eq!(result.first_come, Some(495));
        assert_eq!(result.last_go, Some(1005));
    }

    #[test]
    fn test_calc_005_fixed_offsets() {
        let mut plan = DayPlan::new("washing", 480);
        plan.come_rounding = Rounding::AddFixed { offset: 10 };
        plan.go_rounding = Rounding::SubtractFixed { offset: 10 };
        let result = calculate(&[work_in(355), work_out(855)], &plan);

        assert_eq!(result.first_come, Some(365));
        assert_eq!(result.last_go, Some(845));
        assert_eq!(result.gross_time, 480);
    }

    // ==========================================================================
    // CALC-006: breaks
    // ==========================================================================
    #[test]
    fn test_calc_006_booked_break_reduces_net() {
        let plan = standard_plan();
        let result = calculate(
            &[
                work_in(480),
                input(720, BookingDirection::In, BookingCategory::Break),
                input(750, BookingDirection::Out, BookingCategory::Break),
                work_out(1020),
            ],
            &plan,
        );

        assert_eq!(result.gross_time, 540);
        assert_eq!(result.break_time, 30);
        assert_eq!(result.net_time, 510);
        assert_eq!(result.overtime, 30);
    }

    #[test]
    fn test_calc_007_automatic_break_after_six_hours() {
        let mut plan = standard_plan();
        plan.breaks.push(BreakRule {
            kind: BreakKind::Variable { after_work: 360 },
            duration: 30,
            is_paid: false,
        });
        let result = calculate(&[work_in(480), work_out(990)], &plan);

        assert_eq!(result.gross_time, 510);
        assert_eq!(result.net_time, 480);
        assert!(result.warnings.contains(&WarningCode::AutoBreakApplied));
    }

    #[test]
    fn test_calc_008_paid_break_stays_in_net() {
        let mut plan = standard_plan();
        plan.breaks.push(BreakRule {
            kind: BreakKind::Fixed {
                start: 600,
                end: 615,
            },
            duration: 15,
            is_paid: true,
        });
        let result = calculate(&[work_in(480), work_out(960)], &plan);

        assert_eq!(result.break_time, 15);
        assert_eq!(result.net_time, 480);
    }

    // ==========================================================================
    // CALC-009: net bounds
    // ==========================================================================
    #[test]
    fn test_calc_009_max_net_work_time_caps_net() {
        let mut plan = standard_plan();
        plan.max_net_work_time = Some(600);
        let result = calculate(&[work_in(360), work_out(1080)], &plan);

        assert_eq!(result.gross_time, 720);
        assert_eq!(result.net_time, 600);
        assert_eq!(result.overtime, 120);
        assert!(result.warnings.contains(&WarningCode::MaxTimeReached));
    }

    #[test]
    fn test_calc_010_below_min_work_time_warns() {
        let mut plan = standard_plan();
        plan.min_work_time = Some(240);
        let result = calculate(&[work_in(480), work_out(600)], &plan);

        assert_eq!(result.undertime, 360);
        assert!(result.warnings.contains(&WarningCode::BelowMinWorkTime));
    }

    // ==========================================================================
    // CALC-011: core time
    // ==========================================================================
    #[test]
    fn test_calc_011_missed_core_time() {
        let mut plan = standard_plan();
        plan.core_start = Some(540);
        plan.core_end = Some(900);
        let result = calculate(&[work_in(555), work_out(880)], &plan);

        assert!(result.error_codes.contains(&ErrorCode::MissedCoreStart));
        assert!(result.error_codes.contains(&ErrorCode::MissedCoreEnd));
        assert!(result.has_error());
    }

    #[test]
    fn test_core_time_satisfied() {
        let mut plan = standard_plan();
        plan.core_start = Some(540);
        plan.core_end = Some(900);
        let result = calculate(&[work_in(530), work_out(910)], &plan);
        assert!(!result.has_error());
    }

    // ==========================================================================
    // CALC-012: data errors do not abort the day
    // ==========================================================================
    #[test]
    fn test_calc_012_missing_go_keeps_paired_time() {
        let plan = standard_plan();
        let result = calculate(&[work_in(480), work_out(720), work_in(780)], &plan);

        assert_eq!(result.gross_time, 240);
        assert_eq!(result.booking_count, 3);
        assert!(result.error_codes.contains(&ErrorCode::MissingGo));
        assert_eq!(result.calculated_times.len(), 2);
    }

    #[test]
    fn test_only_unpaired_arrival_has_no_first_come() {
        let plan = standard_plan();
        let result = calculate(&[work_in(480)], &plan);

        assert_eq!(result.gross_time, 0);
        assert_eq!(result.undertime, 480);
        assert_eq!(result.first_come, None);
        assert!(result.error_codes.contains(&ErrorCode::MissingGo));
    }

    // ==========================================================================
    // CALC-013: borrowed next-day departure
    // ==========================================================================
    #[test]
    fn test_calc_013_departure_after_midnight() {
        let plan = DayPlan::new("night", 480);
        let result = calculate(&[work_in(1320), work_out(1440 + 360)], &plan);

        assert_eq!(result.gross_time, 480);
        assert_eq!(result.last_go, Some(1800));
        assert!(result.warnings.contains(&WarningCode::CrossMidnight));
    }

    fn night_plan() -> DayPlan {
        let mut plan = DayPlan::new("night", 420);
        plan.come_from = Some(1320);
        plan.go_from = Some(330);
        plan.go_to = Some(360);
        plan.tolerance.go_plus = 5;
        plan
    }

    #[test]
    fn test_calc_014_night_departure_tolerance_and_window() {
        let plan = night_plan();
        let departure = work_out(1440 + 333);
        let result = calculate(&[work_in(1320), departure], &plan);

        assert_eq!(result.gross_time, 450);
        assert_eq!(result.last_go, Some(1770));
        assert_eq!(result.calculated_times[&departure.id], 1770);
        assert!(result.warnings.contains(&WarningCode::CrossMidnight));
        assert!(!result.warnings.contains(&WarningCode::LateGo));
        assert!(!result.warnings.contains(&WarningCode::EarlyGo));
    }

    #[test]
    fn test_calc_015_night_departure_past_go_window_is_late() {
        let plan = night_plan();
        let result = calculate(&[work_in(1320), work_out(1440 + 400)], &plan);

        assert_eq!(result.gross_time, 520);
        assert!(result.warnings.contains(&WarningCode::LateGo));
    }

    #[test]
    fn test_calc_016_subtract_fixed_keeps_borrowed_departure_past_midnight() {
        let mut plan = DayPlan::new("night", 420);
        plan.go_rounding = Rounding::SubtractFixed { offset: 30 };
        let departure = work_out(1440 + 10);
        let result = calculate(&[work_in(1320), departure], &plan);

        assert_eq!(result.calculated_times[&departure.id], 1440);
        assert_eq!(result.last_go, Some(1440));
        assert_eq!(result.gross_time, 120);
    }

    #[test]
    fn test_multiple_work_pairs_accumulate() {
        let plan = standard_plan();
        let result = calculate(
            &[work_in(480), work_out(720), work_in(765), work_out(1005)],
            &plan,
        );
        assert_eq!(result.gross_time, 480);
        assert_eq!(result.first_come, Some(480));
        assert_eq!(result.last_go, Some(1005));
    }

    fn booking_strategy() -> impl Strategy<Value = Vec<BookingInput>> {
        prop::collection::vec((0i32..1440, any::<bool>(), any::<bool>()), 0..10).prop_map(
            |raw| {
                raw.into_iter()
                    .map(|(time, is_in, is_work)| {
                        input(
                            time,
                            if is_in {
                                BookingDirection::In
                            } else {
                                BookingDirection::Out
                            },
                            if is_work {
                                BookingCategory::Work
                            } else {
                                BookingCategory::Break
                            },
                        )
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_overtime_and_undertime_are_exclusive(
            bookings in booking_strategy(),
            target in 0i32..720,
            interval in 0i32..30,
        ) {
            let mut plan = standard_plan();
            plan.regular_minutes = target;
            plan.come_rounding = Rounding::Nearest { interval };
            plan.go_rounding = Rounding::Up { interval };
            plan.breaks.push(BreakRule {
                kind: BreakKind::Minimum { after_work: 360 },
                duration: 30,
                is_paid: false,
            });

            let result = calculate(&bookings, &plan);
            prop_assert!(result.overtime == 0 || result.undertime == 0);
            prop_assert_eq!(result.net_time - result.target_time, result.overtime - result.undertime);
            prop_assert!(result.net_time >= 0);
            prop_assert!(result.net_time <= result.gross_time);
            prop_assert_eq!(result.booking_count as usize, bookings.len());
        }
    }
}
