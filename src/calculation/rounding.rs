//! Boundary time rounding.
//!
//! Applied to every arrival and departure after tolerance absorption, using
//! the plan's `come_rounding` and `go_rounding` respectively.

use crate::models::Rounding;

/// Applies a rounding configuration to a time in minutes.
///
/// A mode whose parameter is zero or negative returns the input unchanged.
/// `AddFixed` is left unclamped so an arrival may exceed 1439;
/// `SubtractFixed` clamps at zero.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::apply_rounding;
/// use attendance_engine::models::Rounding;
///
/// assert_eq!(apply_rounding(475, Rounding::Nearest { interval: 10 }), 480);
/// assert_eq!(apply_rounding(484, Rounding::Nearest { interval: 10 }), 480);
/// assert_eq!(apply_rounding(355, Rounding::AddFixed { offset: 10 }), 365);
/// assert_eq!(apply_rounding(20, Rounding::SubtractFixed { offset: 30 }), 0);
/// ```
pub fn apply_rounding(minutes: i32, rounding: Rounding) -> i32 {
    match rounding {
        Rounding::None => minutes,
        Rounding::Up { interval } if interval > 0 => {
            let remainder = minutes.rem_euclid(interval);
            if remainder == 0 {
                minutes
            } else {
                minutes + (interval - remainder)
            }
        }
        Rounding::Down { interval } if interval > 0 => minutes - minutes.rem_euclid(interval),
        Rounding::Nearest { interval } if interval > 0 => {
            let remainder = minutes.rem_euclid(interval);
            // Exactly half an interval rounds up.
            if remainder * 2 >= interval {
                minutes + (interval - remainder)
            } else {
                minutes - remainder
            }
        }
        Rounding::AddFixed { offset } if offset > 0 => minutes + offset,
        Rounding::SubtractFixed { offset } if offset > 0 => (minutes - offset).max(0),
        _ => minutes,
    }
}
