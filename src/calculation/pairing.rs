//! Pairing of arrivals with departures.
//!
//! Explicit pair references are honoured first. Remaining bookings of each
//! category pair positionally in time order. Anything left over is reported
//! with an error code rather than dropped.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Booking, BookingCategory, BookingDirection, ErrorCode, MINUTES_PER_DAY};

/// The part of a booking the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInput {
    /// Booking identifier, used to key calculated times.
    pub id: Uuid,
    /// Minutes since midnight of the calculated day; may exceed 1439 for a
    /// departure borrowed from the next day.
    pub time: i32,
    /// Arrival or departure.
    pub direction: BookingDirection,
    /// Work or break boundary.
    pub category: BookingCategory,
    /// Explicit partner booking.
    pub pair_id: Option<Uuid>,
}

impl From<&Booking> for BookingInput {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            time: booking.edited_time,
            direction: booking.direction,
            category: booking.category,
            pair_id: booking.pair_id,
        }
    }
}

/// An arrival matched with its departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPair {
    /// Work or break.
    pub category: BookingCategory,
    /// The opening booking.
    pub arrival: BookingInput,
    /// The closing booking; its time is shifted by a day when it precedes the arrival.
    pub departure: BookingInput,
}

impl BookingPair {
    /// Returns the raw span of the pair in minutes.
    pub fn duration(&self) -> i32 {
        self.departure.time - self.arrival.time
    }
}

/// The outcome of pairing one day's bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingResult {
    /// Matched pairs, ordered by arrival time.
    pub pairs: Vec<BookingPair>,
    /// Bookings without a partner.
    pub unpaired: Vec<BookingInput>,
    /// Errors raised while pairing.
    pub error_codes: BTreeSet<ErrorCode>,
}

/// Pairs arrivals with departures for one employee-day.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{BookingInput, pair_bookings};
/// use attendance_engine::models::{BookingCategory, BookingDirection, ErrorCode};
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
/// let result = pair_bookings(&[
///     booking(480, BookingDirection::In),
///     booking(960, BookingDirection::Out),
///     booking(1000, BookingDirection::In),
/// ]);
/// assert_eq!(result.pairs.len(), 1);
/// assert!(result.error_codes.contains(&ErrorCode::MissingGo));
/// ```
pub fn pair_bookings(bookings: &[BookingInput]) -> PairingResult {
    let mut result = PairingResult::default();

    let valid: Vec<&BookingInput> = bookings
        .iter()
        .filter(|b| {
            if b.time < 0 {
                result.error_codes.insert(ErrorCode::InvalidTime);
                false
            } else {
                true
            }
        })
        .collect();

    let mut used: HashSet<Uuid> = HashSet::new();

    for departure in valid
        .iter()
        .filter(|b| b.direction == BookingDirection::Out)
    {
        if used.contains(&departure.id) {
            continue;
        }
        let partner = valid.iter().find(|candidate| {
            candidate.direction == BookingDirection::In
                && candidate.category == departure.category
                && !used.contains(&candidate.id)
                && (departure.pair_id == Some(candidate.id)
                    || candidate.pair_id == Some(departure.id))
        });
        if let Some(arrival) = partner {
            used.insert(arrival.id);
            used.insert(departure.id);
            let mut departure = **departure;
            if departure.time < arrival.time {
                departure.time += MINUTES_PER_DAY;
            }
            result.pairs.push(BookingPair {
                category: arrival.category,
                arrival: **arrival,
                departure,
            });
        }
    }

    for category in [BookingCategory::Work, BookingCategory::Break] {
        let mut remaining: Vec<&BookingInput> = valid
            .iter()
            .copied()
            .filter(|b| b.category == category && !used.contains(&b.id))
            .collect();
        remaining.sort_by_key(|b| (b.time, direction_order(b.direction)));

        let mut pending: Option<&BookingInput> = None;
        for booking in remaining {
            match booking.direction {
                BookingDirection::In => {
                    if let Some(orphan) = pending.replace(booking) {
                        flag_unpaired(&mut result, orphan);
                    }
                }
                BookingDirection::Out => match pending.take() {
                    Some(arrival) => result.pairs.push(BookingPair {
                        category,
                        arrival: *arrival,
                        departure: *booking,
                    }),
                    None => flag_unpaired(&mut result, booking),
                },
            }
        }
        if let Some(orphan) = pending {
            flag_unpaired(&mut result, orphan);
        }
    }

    result.pairs.sort_by_key(|p| (p.arrival.time, p.departure.time));
    result
}

fn direction_order(direction: BookingDirection) -> u8 {
    match direction {
        BookingDirection::Out => 0,
        BookingDirection::In => 1,
    }
}

fn flag_unpaired(result: &mut PairingResult, booking: &BookingInput) {
    let code = match (booking.category, booking.direction) {
        (BookingCategory::Work, BookingDirection::In) => ErrorCode::MissingGo,
        (BookingCategory::Work, BookingDirection::Out) => ErrorCode::MissingCome,
        (BookingCategory::Break, _) => ErrorCode::UnpairedBreak,
    };
    result.error_codes.insert(code);
    result.unpaired.push(*booking);
}
