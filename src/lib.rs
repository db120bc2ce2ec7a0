//! Daily Time Calculation Engine for time and attendance
//!
//! This crate turns an employee's clock bookings for one calendar day and
//! the day plan assigned to them into a persisted daily value: gross and
//! net working time, overtime or undertime, break time, and the error and
//! warning codes payroll needs to trust or correct the day.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod daily;
pub mod error;
pub mod models;
