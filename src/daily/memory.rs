//! In-memory implementations of the store traits.
//!
//! [`InMemoryStore`] backs every collaborator with maps behind a tokio
//! `RwLock`. It is used by the tests and by callers embedding the engine
//! without a database.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Absence, Booking, DailyValue, EmployeeDayPlan, Holiday};

use super::store::{AbsenceStore, AssignmentStore, BookingStore, DailyValueStore, HolidayStore};

type EmployeeDate = (Uuid, NaiveDate);

/// A single in-memory store implementing all collaborator traits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    bookings: RwLock<HashMap<EmployeeDate, Vec<Booking>>>,
    assignments: RwLock<HashMap<EmployeeDate, EmployeeDayPlan>>,
    holidays: RwLock<HashMap<(Uuid, NaiveDate), Holiday>>,
    absences: RwLock<HashMap<EmployeeDate, Absence>>,
    daily_values: RwLock<HashMap<EmployeeDate, DailyValue>>,
    upserts: AtomicUsize,
    write_backs: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a booking under its employee and date.
    pub async fn add_booking(&self, booking: Booking) {
        let mut bookings = self.bookings.write().await;
        let day = bookings
            .entry((booking.employee_id, booking.date))
            .or_default();
        day.push(booking);
        day.sort_by_key(|b| b.edited_time);
    }

    /// Assigns a day plan, replacing any previous assignment for the date.
    pub async fn assign(&self, assignment: EmployeeDayPlan) {
        self.assignments
            .write()
            .await
            .insert((assignment.employee_id, assignment.date), assignment);
    }

    /// Adds a tenant holiday.
    pub async fn add_holiday(&self, holiday: Holiday) {
        self.holidays
            .write()
            .await
            .insert((holiday.tenant_id, holiday.date), holiday);
    }

    /// Adds an approved absence.
    pub async fn add_absence(&self, absence: Absence) {
        self.absences
            .write()
            .await
            .insert((absence.employee_id, absence.date), absence);
    }

    /// Returns a stored booking by id.
    pub async fn booking(&self, id: Uuid) -> Option<Booking> {
        self.bookings
            .read()
            .await
            .values()
            .flatten()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Returns the number of stored daily values.
    pub async fn daily_value_count(&self) -> usize {
        self.daily_values.read().await.len()
    }

    /// Returns how many upserts were received.
    pub fn upsert_calls(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// Returns how many write-back batches were received.
    pub fn write_back_calls(&self) -> usize {
        self.write_backs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn bookings_for_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .get(&(employee_id, date))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_calculated_times(&self, times: &BTreeMap<Uuid, i32>) -> EngineResult<()> {
        self.write_backs.fetch_add(1, Ordering::SeqCst);
        let mut bookings = self.bookings.write().await;
        for booking in bookings.values_mut().flatten() {
            if let Some(time) = times.get(&booking.id) {
                booking.calculated_time = Some(*time);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn assignment_for_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<EmployeeDayPlan>> {
        Ok(self
            .assignments
            .read()
            .await
            .get(&(employee_id, date))
            .cloned())
    }
}

#[async_trait]
impl HolidayStore for InMemoryStore {
    async fn holiday_on(&self, tenant_id: Uuid, date: NaiveDate) -> EngineResult<Option<Holiday>> {
        Ok(self.holidays.read().await.get(&(tenant_id, date)).cloned())
    }
}

#[async_trait]
impl DailyValueStore for InMemoryStore {
    async fn upsert(&self, value: &DailyValue) -> EngineResult<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.daily_values
            .write()
            .await
            .insert((value.employee_id, value.value_date), value.clone());
        Ok(())
    }

    async fn get_by_employee_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<DailyValue>> {
        Ok(self
            .daily_values
            .read()
            .await
            .get(&(employee_id, date))
            .cloned())
    }
}

#[async_trait]
impl AbsenceStore for InMemoryStore {
    async fn approved_absence(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<Absence>> {
        Ok(self.absences.read().await.get(&(employee_id, date)).cloned())
    }
}
