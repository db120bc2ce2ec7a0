//! The daily calculation orchestrator.
//!
//! For one employee-day this module resolves which scenario applies
//! (off day, holiday, no bookings or a regular workday), invokes the
//! [`calculate`](crate::calculation::calculate) function when bookings
//! exist, applies the day plan's policies otherwise, and commits the
//! resulting [`DailyValue`](crate::models::DailyValue) through the store
//! traits.

mod memory;
mod scenario;
mod service;
mod store;

pub use memory::InMemoryStore;
pub use scenario::{DayScenario, resolve_scenario};
pub use service::DailyCalcService;
pub use store::{AbsenceStore, AssignmentStore, BookingStore, DailyValueStore, HolidayStore};
