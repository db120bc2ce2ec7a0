//! The Calculator: pure daily time arithmetic.
//!
//! This module contains booking pairing, tolerance absorption, boundary
//! rounding, break deduction and the [`calculate`] entry point that combines
//! them. Nothing here knows about holidays, absences or persistence.

mod breaks;
mod calculator;
mod pairing;
mod rounding;
mod tolerance;

pub use breaks::{BreakDeduction, calculate_breaks};
pub use calculator::{DayCalculation, calculate};
pub use pairing::{BookingInput, BookingPair, PairingResult, pair_bookings};
pub use rounding::apply_rounding;
pub use tolerance::{apply_come_tolerance, apply_go_tolerance, check_come_window, check_go_window};
