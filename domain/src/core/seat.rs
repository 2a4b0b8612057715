//! Seat identifiers

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seats at the table.
pub const SEAT_COUNT: usize = 9;

/// A numbered player slot (1-9), stable for the duration of a match.
///
/// "Nobody" is expressed as `Option<SeatId>::None` rather than seat 0.
///
/// # Example
///
/// ```
/// use werewolf_domain::SeatId;
///
/// let seat = SeatId::new(4).unwrap();
/// assert_eq!(seat.index(), 3);
/// assert!(SeatId::new(0).is_err());
/// assert!(SeatId::new(10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeatId(u8);

impl SeatId {
    /// Create a seat id, rejecting anything outside 1..=9
    pub fn new(number: u8) -> Result<Self, DomainError> {
        if (1..=SEAT_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(DomainError::InvalidSeat(number as usize))
        }
    }

    /// Seat for a zero-based index into the player list
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SEAT_COUNT).then(|| Self(index as u8 + 1))
    }

    /// The seat number (1-9)
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into the player list
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All seats in ascending order
    pub fn all() -> impl Iterator<Item = SeatId> {
        (1..=SEAT_COUNT as u8).map(SeatId)
    }

    /// Every seat in speaking order, starting immediately after this one
    /// and wrapping around the table. This seat comes last.
    pub fn clockwise_after(self) -> impl Iterator<Item = SeatId> {
        let start = self.index();
        (1..=SEAT_COUNT).map(move |offset| SeatId(((start + offset) % SEAT_COUNT) as u8 + 1))
    }
}

impl TryFrom<u8> for SeatId {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SeatId::new(value)
    }
}

impl From<SeatId> for u8 {
    fn from(seat: SeatId) -> Self {
        seat.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
