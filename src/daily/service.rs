//! The daily calculation service.
//!
//! [`DailyCalcService`] resolves the scenario for an employee-day, builds
//! the calculator input, applies the scenario policies and commits the
//! resulting [`DailyValue`] through the store collaborators.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{BookingInput, DayCalculation, calculate};
use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Booking, DailyValue, DayChangePolicy, DayPlan, ErrorCode, HolidayCreditPolicy,
    MINUTES_PER_DAY, NoBookingBehavior, WarningCode, format_minutes,
};

use super::scenario::{DayScenario, resolve_scenario};
use super::store::{AbsenceStore, AssignmentStore, BookingStore, DailyValueStore, HolidayStore};

/// Calculates and commits daily values for employees.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::daily::{DailyCalcService, InMemoryStore};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = Arc::new(InMemoryStore::new());
/// let service = DailyCalcService::from_shared(store, EngineSettings::default());
///
/// // No day plan is assigned, so this is an off day.
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let value = service
///     .calculate_day(Uuid::new_v4(), Uuid::new_v4(), date)
///     .await
///     .unwrap()
///     .unwrap();
/// assert_eq!(value.target_time, 0);
/// # }
/// ```
#[derive(Clone)]
pub struct DailyCalcService {
    bookings: Arc<dyn BookingStore>,
    assignments: Arc<dyn AssignmentStore>,
    holidays: Arc<dyn HolidayStore>,
    daily_values: Arc<dyn DailyValueStore>,
    absences: Option<Arc<dyn AbsenceStore>>,
    settings: EngineSettings,
}

/// Calculator output plus the times to write back to the booking store.
struct Outcome {
    calculation: DayCalculation,
    write_back: BTreeMap<Uuid, i32>,
}

impl Outcome {
    fn synthesized(calculation: DayCalculation) -> Self {
        Self {
            calculation,
            write_back: BTreeMap::new(),
        }
    }
}

impl DailyCalcService {
    /// Creates a service without an absence store.
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        assignments: Arc<dyn AssignmentStore>,
        holidays: Arc<dyn HolidayStore>,
        daily_values: Arc<dyn DailyValueStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            bookings,
            assignments,
            holidays,
            daily_values,
            absences: None,
            settings,
        }
    }

    /// Creates a service whose collaborators are all backed by one store.
    ///
    /// The absence store is not wired; use [`with_absence_store`](Self::with_absence_store).
    pub fn from_shared<S>(store: Arc<S>, settings: EngineSettings) -> Self
    where
        S: BookingStore + AssignmentStore + HolidayStore + DailyValueStore + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            settings,
        )
    }

    /// Wires an absence store for the `use_absence` no-booking policy.
    pub fn with_absence_store(mut self, absences: Arc<dyn AbsenceStore>) -> Self {
        self.absences = Some(absences);
        self
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Calculates one employee-day and commits the result.
    ///
    /// Returns `Ok(None)` when the day plan's no-booking policy is `skip`;
    /// nothing is written in that case. Store failures are returned as
    /// errors; data anomalies are reported on the returned value.
    pub async fn calculate_day(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<DailyValue>> {
        let assignment = self
            .assignments
            .assignment_for_employee_date(employee_id, date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, date, e))?;
        let bookings = self
            .bookings
            .bookings_for_employee_date(employee_id, date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, date, e))?;
        let holiday = self
            .holidays
            .holiday_on(tenant_id, date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, date, e))?;

        let bookings = self
            .without_carried_departure(employee_id, date, bookings)
            .await?;

        let plan = assignment.as_ref().map(|a| &a.day_plan);
        let scenario = resolve_scenario(plan, holiday.is_some(), bookings.len());
        debug!(
            employee_id = %employee_id,
            date = %date,
            scenario = ?scenario,
            bookings = bookings.len(),
            "Resolved day scenario"
        );

        let outcome = match (scenario, plan) {
            (scenario, Some(plan)) if scenario.runs_calculator() => {
                let mut outcome = self.workday(employee_id, date, plan, &bookings).await?;
                if scenario == DayScenario::WorkedOnHoliday {
                    outcome
                        .calculation
                        .warnings
                        .insert(WarningCode::WorkedOnHoliday);
                }
                Some(outcome)
            }
            (DayScenario::OffDay { has_bookings }, _) => {
                Some(Outcome::synthesized(off_day(bookings.len(), has_bookings)))
            }
            (DayScenario::HolidayCredit(policy), Some(plan)) => {
                Some(Outcome::synthesized(holiday_credit(plan, policy)))
            }
            (DayScenario::NoBookings(behavior), Some(plan)) => self
                .no_bookings(employee_id, date, plan, behavior)
                .await?
                .map(Outcome::synthesized),
            // Calculator scenarios with a plan are taken by the first arm, and
            // every scenario other than OffDay is resolved from a present plan.
            _ => Some(Outcome::synthesized(off_day(bookings.len(), false))),
        };

        let Some(outcome) = outcome else {
            debug!(employee_id = %employee_id, date = %date, "Day skipped by no-booking policy");
            return Ok(None);
        };

        self.commit(tenant_id, employee_id, date, outcome)
            .await
            .map(Some)
    }

    /// Recalculates every date in `from..=to` for one employee, in order.
    ///
    /// Returns the number of days that produced a daily value. A store
    /// failure stops the run; days already committed stay committed.
    pub async fn recalculate_range(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<usize> {
        self.check_range(from, to)?;

        let mut calculated = 0;
        for date in from.iter_days().take_while(|d| *d <= to) {
            if self
                .calculate_day(tenant_id, employee_id, date)
                .await?
                .is_some()
            {
                calculated += 1;
            }
        }

        info!(
            employee_id = %employee_id,
            from = %from,
            to = %to,
            days_calculated = calculated,
            "Recalculated date range"
        );
        Ok(calculated)
    }

    /// Recalculates a range for several employees.
    ///
    /// Employees run concurrently; each employee's dates run in order.
    /// Duplicate ids are calculated once. Returns the total number of days
    /// that produced a daily value.
    pub async fn recalculate_employees(
        &self,
        tenant_id: Uuid,
        employee_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<usize> {
        self.check_range(from, to)?;

        let employees: BTreeSet<Uuid> = employee_ids.iter().copied().collect();
        let counts = try_join_all(
            employees
                .iter()
                .map(|employee_id| self.recalculate_range(tenant_id, *employee_id, from, to)),
        )
        .await?;

        Ok(counts.into_iter().sum())
    }

    fn check_range(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<()> {
        if from > to {
            return Err(EngineError::InvalidDateRange { from, to });
        }
        let days = (to - from).num_days() + 1;
        if days > i64::from(self.settings.max_range_days) {
            return Err(EngineError::RangeTooLarge {
                days,
                max: self.settings.max_range_days,
            });
        }
        Ok(())
    }

    /// Drops a leading work departure that closes the previous day's open shift.
    ///
    /// The previous day claims such a departure when it has a day plan and
    /// its last work booking is an arrival.
    async fn without_carried_departure(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        mut bookings: Vec<Booking>,
    ) -> EngineResult<Vec<Booking>> {
        let Some(first) = first_work_booking(&bookings) else {
            return Ok(bookings);
        };
        if !first.is_work_out() {
            return Ok(bookings);
        }
        let Some(previous_date) = date.pred_opt() else {
            return Ok(bookings);
        };

        let previous_plan = self
            .assignments
            .assignment_for_employee_date(employee_id, previous_date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, previous_date, e))?;
        if previous_plan.is_none() {
            return Ok(bookings);
        }

        let previous = self
            .bookings
            .bookings_for_employee_date(employee_id, previous_date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, previous_date, e))?;
        if last_work_booking(&previous).is_some_and(Booking::is_work_in) {
            let carried = first.id;
            debug!(
                employee_id = %employee_id,
                date = %date,
                booking_id = %carried,
                time = %format_minutes(first.edited_time),
                "Departure attributed to previous day"
            );
            bookings.retain(|b| b.id != carried);
        }
        Ok(bookings)
    }

    /// Runs the calculator, borrowing the next day's first departure for an open shift.
    async fn workday(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        plan: &DayPlan,
        bookings: &[Booking],
    ) -> EngineResult<Outcome> {
        let (mut inputs, out_of_day): (Vec<BookingInput>, Vec<BookingInput>) = bookings
            .iter()
            .map(BookingInput::from)
            .partition(|input| within_day(input.time));
        let mut borrowed: Option<Uuid> = None;

        if last_work_booking(bookings).is_some_and(Booking::is_work_in) {
            if let Some(next_date) = date.succ_opt() {
                let next = self
                    .bookings
                    .bookings_for_employee_date(employee_id, next_date)
                    .await
                    .inspect_err(|e| log_store_failure(employee_id, next_date, e))?;
                if let Some(departure) = first_work_booking(&next)
                    .filter(|b| b.is_work_out())
                {
                    debug!(
                        employee_id = %employee_id,
                        date = %date,
                        booking_id = %departure.id,
                        time = %format_minutes(departure.edited_time + MINUTES_PER_DAY),
                        "Borrowed next day's departure"
                    );
                    let mut input = BookingInput::from(departure);
                    input.time += MINUTES_PER_DAY;
                    borrowed = Some(input.id);
                    inputs.push(input);
                }
            }
        }

        let mut calculation = calculate(&inputs, plan);

        if !out_of_day.is_empty() {
            for input in &out_of_day {
                warn!(
                    employee_id = %employee_id,
                    date = %date,
                    booking_id = %input.id,
                    time = input.time,
                    "Booking time outside its day"
                );
            }
            calculation.error_codes.insert(ErrorCode::InvalidTime);
            calculation.booking_count += out_of_day.len() as u32;
        }

        if borrowed.is_some() && plan.day_change != DayChangePolicy::ToFirst {
            warn!(
                employee_id = %employee_id,
                date = %date,
                policy = ?plan.day_change,
                "Day change policy not supported, attributing shift to first day"
            );
            calculation
                .warnings
                .insert(WarningCode::DayChangeNotImplemented);
        }

        let write_back = calculation
            .calculated_times
            .iter()
            .map(|(id, time)| {
                if Some(*id) == borrowed {
                    (*id, time - MINUTES_PER_DAY)
                } else {
                    (*id, *time)
                }
            })
            .collect();

        Ok(Outcome {
            calculation,
            write_back,
        })
    }

    /// Applies the no-booking policy. `None` means the day is skipped.
    async fn no_bookings(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        plan: &DayPlan,
        behavior: NoBookingBehavior,
    ) -> EngineResult<Option<DayCalculation>> {
        let target = plan.regular_minutes;
        let calculation = match behavior {
            NoBookingBehavior::Error => missing_bookings(target),
            NoBookingBehavior::CreditTarget => {
                let mut calculation = credited(target, target);
                calculation
                    .warnings
                    .insert(WarningCode::NoBookingsCredited);
                calculation
            }
            NoBookingBehavior::CreditZero => {
                let mut calculation = credited(target, 0);
                calculation
                    .warnings
                    .insert(WarningCode::NoBookingsCredited);
                calculation
            }
            NoBookingBehavior::UseAbsence => match &self.absences {
                None => {
                    let mut calculation = missing_bookings(target);
                    calculation
                        .warnings
                        .insert(WarningCode::AbsenceNotImplemented);
                    calculation
                }
                Some(absences) => match absences
                    .approved_absence(employee_id, date)
                    .await
                    .inspect_err(|e| log_store_failure(employee_id, date, e))?
                {
                    Some(absence) => {
                        let mut calculation = credited(target, absence.portion.credit(target));
                        calculation.warnings.insert(WarningCode::AbsenceCredited);
                        calculation
                    }
                    None => missing_bookings(target),
                },
            },
            NoBookingBehavior::Skip => return Ok(None),
        };
        Ok(Some(calculation))
    }

    /// Stamps, writes back and upserts an outcome.
    async fn commit(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
        outcome: Outcome,
    ) -> EngineResult<DailyValue> {
        let previous = self
            .daily_values
            .get_by_employee_date(employee_id, date)
            .await
            .inspect_err(|e| log_store_failure(employee_id, date, e))?;
        let (id, version) = match previous {
            Some(previous) => (previous.id, previous.calculation_version + 1),
            None => (Uuid::new_v4(), 1),
        };

        let calculation = outcome.calculation;
        let value = DailyValue {
            id,
            tenant_id,
            employee_id,
            value_date: date,
            gross_time: calculation.gross_time,
            net_time: calculation.net_time,
            target_time: calculation.target_time,
            overtime: calculation.overtime,
            undertime: calculation.undertime,
            break_time: calculation.break_time,
            has_error: calculation.has_error(),
            error_codes: calculation.error_codes,
            warnings: calculation.warnings,
            first_come: calculation.first_come,
            last_go: calculation.last_go,
            booking_count: calculation.booking_count,
            calculated_at: Utc::now(),
            calculation_version: version,
        };

        if self.settings.write_back_calculated_times && !outcome.write_back.is_empty() {
            self.bookings
                .write_calculated_times(&outcome.write_back)
                .await
                .inspect_err(|e| log_store_failure(employee_id, date, e))?;
        }

        self.daily_values
            .upsert(&value)
            .await
            .inspect_err(|e| log_store_failure(employee_id, date, e))?;

        info!(
            employee_id = %employee_id,
            date = %date,
            version = value.calculation_version,
            net_time = value.net_time,
            has_error = value.has_error,
            "Committed daily value"
        );
        Ok(value)
    }
}

fn log_store_failure(employee_id: Uuid, date: NaiveDate, error: &EngineError) {
    warn!(
        employee_id = %employee_id,
        date = %date,
        error = %error,
        "Store call failed"
    );
}

fn within_day(time: i32) -> bool {
    (0..MINUTES_PER_DAY).contains(&time)
}

/// Work bookings whose time lies within their own day.
fn day_work_bookings(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings
        .iter()
        .filter(|b| (b.is_work_in() || b.is_work_out()) && within_day(b.edited_time))
}

fn first_work_booking(bookings: &[Booking]) -> Option<&Booking> {
    day_work_bookings(bookings).min_by_key(|b| b.edited_time)
}

fn last_work_booking(bookings: &[Booking]) -> Option<&Booking> {
    day_work_bookings(bookings).max_by_key(|b| b.edited_time)
}

fn off_day(booking_count: usize, has_bookings: bool) -> DayCalculation {
    let mut calculation = DayCalculation {
        booking_count: booking_count as u32,
        ..DayCalculation::default()
    };
    calculation.warnings.insert(WarningCode::OffDay);
    if has_bookings {
        calculation.warnings.insert(WarningCode::BookingsOnOffDay);
    }
    calculation
}

fn holiday_credit(plan: &DayPlan, policy: HolidayCreditPolicy) -> DayCalculation {
    let target = plan.regular_minutes;
    let mut calculation = match policy {
        HolidayCreditPolicy::TargetTime => credited(target, target),
        HolidayCreditPolicy::Zero => credited(0, 0),
        HolidayCreditPolicy::Average => {
            let mut calculation = credited(target, target);
            calculation
                .warnings
                .insert(WarningCode::AverageNotImplemented);
            calculation
        }
    };
    calculation.warnings.insert(WarningCode::Holiday);
    calculation
}

/// A day credited with `minutes` of gross and net time against `target`.
fn credited(target: i32, minutes: i32) -> DayCalculation {
    DayCalculation {
        gross_time: minutes,
        net_time: minutes,
        target_time: target,
        overtime: (minutes - target).max(0),
        undertime: (target - minutes).max(0),
        ..DayCalculation::default()
    }
}

fn missing_bookings(target: i32) -> DayCalculation {
    let mut calculation = credited(target, 0);
    calculation.error_codes.insert(ErrorCode::NoBookings);
    calculation
}
