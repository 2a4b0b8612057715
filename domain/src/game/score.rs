//! Tournament scoreboard

use crate::core::seat::{SEAT_COUNT, SeatId};
use crate::role::{Faction, RoleAssignment};
use serde::{Deserialize, Serialize};

/// Awarded to every seat on the winning faction
pub const FACTION_WIN_BONUS: i64 = 10;
/// Awarded to the match MVP
pub const MVP_BONUS: i64 = 5;
/// Charged to the match LVP
pub const LVP_PENALTY: i64 = -5;

/// One row of the sorted standings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub seat: SeatId,
    pub points: i64,
}

/// Per-seat points, kept for the whole tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    points: [i64; SEAT_COUNT],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            points: [0; SEAT_COUNT],
        }
    }

    pub fn points(&self, seat: SeatId) -> i64 {
        self.points[seat.index()]
    }

    /// Points in seat order
    pub fn as_slice(&self) -> &[i64] {
        &self.points
    }

    pub fn add(&mut self, seat: SeatId, delta: i64) {
        self.points[seat.index()] += delta;
    }

    /// Apply the end-of-match adjustments
    pub fn apply_match(
        &mut self,
        assignment: &RoleAssignment,
        winner: Faction,
        mvp: Option<SeatId>,
        lvp: Option<SeatId>,
    ) {
        for (seat, role) in assignment.iter() {
            if role.faction() == winner {
                self.add(seat, FACTION_WIN_BONUS);
            }
        }
        if let Some(seat) = mvp {
            self.add(seat, MVP_BONUS);
        }
        if let Some(seat) = lvp {
            self.add(seat, LVP_PENALTY);
        }
    }

    /// Seats sorted by points descending, ties broken by ascending seat
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = SeatId::all()
            .map(|seat| Standing {
                seat,
                points: self.points(seat),
            })
            .collect();
        standings.sort_by(|a, b| b.points.cmp(&a.points).then(a.seat.cmp(&b.seat)));
        standings
    }

    pub fn champion(&self) -> SeatId {
        self.standings()[0].seat
    }
}
