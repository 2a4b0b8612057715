//! Tournament configuration

use thiserror::Error;
use werewolf_domain::{RoleComposition, SEAT_COUNT, SeatId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TournamentConfigError {
    #[error("match count must be a positive integer, got {0:?}")]
    InvalidMatchCount(String),

    #[error("expected at most {max} seat names, got {0}", max = SEAT_COUNT)]
    TooManySeatNames(usize),
}

/// Parse the "number of matches" input. Absent or blank input means 1.
///
/// # Examples
///
/// ```
/// use werewolf_application::config::parse_matches;
///
/// assert_eq!(parse_matches(None), Ok(1));
/// assert_eq!(parse_matches(Some("  ")), Ok(1));
/// assert_eq!(parse_matches(Some("3")), Ok(3));
/// assert!(parse_matches(Some("0")).is_err());
/// ```
pub fn parse_matches(input: Option<&str>) -> Result<u32, TournamentConfigError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(1);
    };
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TournamentConfigError::InvalidMatchCount(raw.to_string())),
    }
}

/// What the orchestrator runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentConfig {
    pub matches: u32,
    pub composition: RoleComposition,
    seat_names: Vec<String>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            matches: 1,
            composition: RoleComposition::standard(),
            seat_names: default_names(),
        }
    }
}

impl TournamentConfig {
    pub fn new(matches: u32) -> Self {
        Self {
            matches,
            ..Self::default()
        }
    }

    /// Set display names; seats without a name keep `Seat <n>`.
    pub fn with_seat_names(mut self, names: Vec<String>) -> Result<Self, TournamentConfigError> {
        if names.len() > SEAT_COUNT {
            return Err(TournamentConfigError::TooManySeatNames(names.len()));
        }
        let mut seat_names = default_names();
        for (slot, name) in seat_names.iter_mut().zip(names) {
            *slot = name;
        }
        self.seat_names = seat_names;
        Ok(self)
    }

    pub fn seat_name(&self, seat: SeatId) -> &str {
        &self.seat_names[seat.index()]
    }

    pub fn seat_names(&self) -> &[String] {
        &self.seat_names
    }
}

fn default_names() -> Vec<String> {
    SeatId::all().map(|seat| format!("Seat {seat}")).collect()
}
