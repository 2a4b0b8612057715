//! Board snapshot
//!
//! Everything the renderer knows about the tournament, rebuilt purely from
//! the event stream. It never sees engine state directly.

use werewolf_domain::{Faction, GameEvent, Phase, Role, SeatId, Standing, WitchAction};

/// One seat as seen from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub match_number: u32,
    pub total_matches: u32,
    pub day: u32,
    pub phase: Option<Phase>,
    pub seats: Vec<SeatView>,
    pub antidote_used: bool,
    pub poison_used: bool,
    pub last_winner: Option<Faction>,
    pub standings: Vec<Standing>,
    pub matches_completed: u32,
    pub matches_aborted: u32,
    pub champion: Option<SeatId>,
    pub finished: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the snapshot
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MatchStarted {
                match_number,
                total_matches,
                seats,
            } => {
                self.match_number = *match_number;
                self.total_matches = *total_matches;
                self.day = 0;
                self.phase = None;
                self.antidote_used = false;
                self.poison_used = false;
                self.last_winner = None;
                self.seats = seats
                    .iter()
                    .map(|info| SeatView {
                        seat: info.seat,
                        name: info.name.clone(),
                        role: info.role,
                        alive: true,
                    })
                    .collect();
            }
            GameEvent::PhaseBoundary { day, phase } => {
                self.day = *day;
                self.phase = Some(*phase);
            }
            GameEvent::WitchDecision { decision, .. } => match decision {
                WitchAction::Saved { .. } => self.antidote_used = true,
                WitchAction::Poisoned { .. } => self.poison_used = true,
                WitchAction::LetDie { .. } | WitchAction::HeldPoison => {}
            },
            GameEvent::Death { seat, .. } => {
                if let Some(view) = self.seat_mut(*seat) {
                    view.alive = false;
                }
            }
            GameEvent::FactionResult { winner, .. } => {
                self.last_winner = Some(*winner);
            }
            GameEvent::AwardResult { standings, .. } => {
                self.standings = standings.clone();
                self.matches_completed += 1;
            }
            GameEvent::MatchAborted { .. } => {
                self.matches_aborted += 1;
            }
            GameEvent::TournamentFinished {
                standings,
                champion,
            } => {
                self.standings = standings.clone();
                self.champion = Some(*champion);
                self.finished = true;
            }
            GameEvent::Reveal { .. }
            | GameEvent::Speech { .. }
            | GameEvent::VoteTally { .. }
            | GameEvent::Retaliation { .. }
            | GameEvent::NoAction { .. }
            | GameEvent::AwardTally { .. } => {}
        }
    }

    pub fn seat(&self, seat: SeatId) -> Option<&SeatView> {
        self.seats.iter().find(|v| v.seat == seat)
    }

    fn seat_mut(&mut self, seat: SeatId) -> Option<&mut SeatView> {
        self.seats.iter_mut().find(|v| v.seat == seat)
    }

    /// Seat label for rendering, "Seat 3 (Aster)" when a name is known
    pub fn label(&self, seat: SeatId) -> String {
        match self.seat(seat) {
            Some(view) => format!("Seat {} ({})", seat, view.name),
            None => format!("Seat {}", seat),
        }
    }

    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|v| v.alive).count()
    }

    /// Matches that have reached a terminal event
    pub fn matches_done(&self) -> u32 {
        self.matches_completed + self.matches_aborted
    }
}
