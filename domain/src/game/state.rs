//! Game state, phases and the win-condition check

use super::player::Player;
use crate::core::error::DomainError;
use crate::core::seat::{SEAT_COUNT, SeatId};
use crate::role::{Faction, Role, RoleAssignment, WinGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-phase of the night/day state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NightSeer,
    NightWolfDiscuss,
    NightWolfVote,
    NightWitchAntidote,
    NightWitchPoison,
    DayAnnounce,
    DayHunterRetaliation,
    DayLastWords,
    DayDiscussion,
    DayVote,
    DayExecution,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NightSeer => "night_seer",
            Phase::NightWolfDiscuss => "night_wolf_discuss",
            Phase::NightWolfVote => "night_wolf_vote",
            Phase::NightWitchAntidote => "night_witch_antidote",
            Phase::NightWitchPoison => "night_witch_poison",
            Phase::DayAnnounce => "day_announce",
            Phase::DayHunterRetaliation => "day_hunter_retaliation",
            Phase::DayLastWords => "day_last_words",
            Phase::DayDiscussion => "day_discussion",
            Phase::DayVote => "day_vote",
            Phase::DayExecution => "day_execution",
            Phase::GameOver => "game_over",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::NightSeer => "Seer",
            Phase::NightWolfDiscuss => "Wolf Discussion",
            Phase::NightWolfVote => "Wolf Vote",
            Phase::NightWitchAntidote => "Witch Antidote",
            Phase::NightWitchPoison => "Witch Poison",
            Phase::DayAnnounce => "Dawn",
            Phase::DayHunterRetaliation => "Hunter Retaliation",
            Phase::DayLastWords => "Last Words",
            Phase::DayDiscussion => "Discussion",
            Phase::DayVote => "Vote",
            Phase::DayExecution => "Execution",
            Phase::GameOver => "Game Over",
        }
    }

    pub fn is_night(&self) -> bool {
        matches!(
            self,
            Phase::NightSeer
                | Phase::NightWolfDiscuss
                | Phase::NightWolfVote
                | Phase::NightWitchAntidote
                | Phase::NightWitchPoison
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Why a seat died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    WolfKill,
    Poison,
    Execution,
    HunterShot,
}

impl DeathCause {
    /// The hunter may retaliate only after a wolf kill or a vote execution
    pub fn allows_retaliation(&self) -> bool {
        matches!(self, DeathCause::WolfKill | DeathCause::Execution)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeathCause::WolfKill => "killed by the wolves",
            DeathCause::Poison => "poisoned",
            DeathCause::Execution => "executed by vote",
            DeathCause::HunterShot => "shot by the hunter",
        }
    }
}

/// A death that has been applied to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub seat: SeatId,
    pub role: Role,
    pub cause: DeathCause,
}

/// Deaths decided during the night and applied at dawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeaths {
    /// The wolf pack's target, unless the witch saved it
    pub wolf_kill: Option<SeatId>,
    /// The witch's poison target
    pub poison: Option<SeatId>,
}

impl PendingDeaths {
    pub fn is_empty(&self) -> bool {
        self.wolf_kill.is_none() && self.poison.is_none()
    }

    /// Victims in application order (wolf kill first). A seat named by both
    /// slots dies once, and counts as poisoned.
    pub fn victims(&self) -> Vec<(SeatId, DeathCause)> {
        match (self.wolf_kill, self.poison) {
            (Some(killed), Some(poisoned)) if killed == poisoned => {
                vec![(poisoned, DeathCause::Poison)]
            }
            (killed, poisoned) => killed
                .map(|s| (s, DeathCause::WolfKill))
                .into_iter()
                .chain(poisoned.map(|s| (s, DeathCause::Poison)))
                .collect(),
        }
    }
}

/// Decide the winner from the living players, if any
///
/// Wolves win when every special role or every villager is dead; the
/// villagers' side wins when every wolf is dead.
pub fn evaluate_winner(players: &[Player]) -> Option<Faction> {
    let living_in =
        |group: WinGroup| players.iter().any(|p| p.alive && p.role.win_group() == group);

    if !living_in(WinGroup::Specials) || !living_in(WinGroup::Villagers) {
        Some(Faction::Wolves)
    } else if !living_in(WinGroup::Wolves) {
        Some(Faction::Villagers)
    } else {
        None
    }
}

/// Mutable snapshot of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    day: u32,
    phase: Phase,
    players: Vec<Player>,
    pending: PendingDeaths,
    winner: Option<Faction>,
}

impl GameState {
    /// Fresh state for a new match: day 1, first night, everybody alive
    pub fn new(assignment: &RoleAssignment) -> Self {
        Self {
            day: 1,
            phase: Phase::NightSeer,
            players: assignment
                .iter()
                .map(|(seat, role)| Player::new(seat, role))
                .collect(),
            pending: PendingDeaths::default(),
            winner: None,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatId) -> &Player {
        &self.players[seat.index()]
    }

    pub fn pending(&self) -> PendingDeaths {
        self.pending
    }

    pub fn set_wolf_kill(&mut self, target: Option<SeatId>) {
        self.pending.wolf_kill = target;
    }

    pub fn set_poison(&mut self, target: Option<SeatId>) {
        self.pending.poison = target;
    }

    /// Begin the next night
    pub fn advance_day(&mut self) {
        self.day += 1;
        self.phase = Phase::NightSeer;
        self.pending = PendingDeaths::default();
    }

    pub fn is_alive(&self, seat: SeatId) -> bool {
        self.player(seat).alive
    }

    pub fn living_seats(&self) -> Vec<SeatId> {
        self.players
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.seat)
            .collect()
    }

    /// Living seats holding `role`, ascending
    pub fn living_with_role(&self, role: Role) -> Vec<SeatId> {
        self.players
            .iter()
            .filter(|p| p.alive && p.role == role)
            .map(|p| p.seat)
            .collect()
    }

    /// Mark a seat dead. Returns `false` if it was already dead.
    pub fn kill(&mut self, seat: SeatId) -> Result<bool, DomainError> {
        let player = self
            .players
            .get_mut(seat.index())
            .ok_or(DomainError::InvalidSeat(seat.get() as usize))?;
        let was_alive = player.alive;
        player.alive = false;
        Ok(was_alive)
    }

    pub fn consume_antidote(&mut self, witch: SeatId) -> Result<(), DomainError> {
        match self.players[witch.index()].potions.as_mut() {
            Some(potions) if potions.antidote => {
                potions.antidote = false;
                Ok(())
            }
            _ => Err(DomainError::invariant(format!(
                "seat {witch} has no antidote to use"
            ))),
        }
    }

    pub fn consume_poison(&mut self, witch: SeatId) -> Result<(), DomainError> {
        match self.players[witch.index()].potions.as_mut() {
            Some(potions) if potions.poison => {
                potions.poison = false;
                Ok(())
            }
            _ => Err(DomainError::invariant(format!(
                "seat {witch} has no poison to use"
            ))),
        }
    }

    /// Re-run the win-condition check
    ///
    /// Idempotent: once a winner is decided it is kept, and calling this
    /// again without a state change returns the same answer.
    pub fn check_win(&mut self) -> Option<Faction> {
        if self.winner.is_none() {
            self.winner = evaluate_winner(&self.players);
        }
        self.winner
    }

    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Debug check of the structural invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.players.len() != SEAT_COUNT {
            return Err(DomainError::invariant(format!(
                "expected {SEAT_COUNT} players, found {}",
                self.players.len()
            )));
        }
        for (index, player) in self.players.iter().enumerate() {
            if player.seat.index() != index {
                return Err(DomainError::invariant(format!(
                    "seat {} stored at position {}",
                    player.seat,
                    index + 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(n: u8) -> SeatId {
        SeatId::new(n).unwrap()
    }

    /// W W W V V V Seer Witch Hunter
    fn state() -> GameState {
        let assignment = RoleAssignment::from_roles(vec![
            Role::Wolf,
            Role::Wolf,
            Role::Wolf,
            Role::Villager,
            Role::Villager,
            Role::Villager,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
        ])
        .unwrap();
        GameState::new(&assignment)
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.day(), 1);
        assert_eq!(state.phase(), Phase::NightSeer);
        assert_eq!(state.players().len(), SEAT_COUNT);
        assert!(state.pending().is_empty());
        assert!(!state.is_over());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut state = state();
        assert!(state.kill(seat(4)).unwrap());
        assert!(!state.kill(seat(4)).unwrap());
        assert!(!state.is_alive(seat(4)));
    }

    #[test]
    fn test_pending_victims_same_seat_dies_once_as_poisoned() {
        let pending = PendingDeaths {
            wolf_kill: Some(seat(9)),
            poison: Some(seat(9)),
        };
        assert_eq!(pending.victims(), vec![(seat(9), DeathCause::Poison)]);
    }

    #[test]
    fn test_pending_victims_order() {
        let pending = PendingDeaths {
            wolf_kill: Some(seat(6)),
            poison: Some(seat(2)),
        };
        assert_eq!(
            pending.victims(),
            vec![(seat(6), DeathCause::WolfKill), (seat(2), DeathCause::Poison)]
        );
        assert!(PendingDeaths::default().victims().is_empty());
    }

    #[test]
    fn test_villagers_win_when_wolves_are_gone() {
        let mut state = state();
        for n in 1..=3 {
            state.kill(seat(n)).unwrap();
            if n < 3 {
                assert_eq!(state.check_win(), None);
            }
        }
        assert_eq!(state.check_win(), Some(Faction::Villagers));
    }

    #[test]
    fn test_wolves_win_when_specials_are_gone() {
        let mut state = state();
        for n in 7..=9 {
            state.kill(seat(n)).unwrap();
        }
        assert_eq!(state.check_win(), Some(Faction::Wolves));
    }

    #[test]
    fn test_wolves_win_when_villagers_are_gone() {
        let mut state = state();
        for n in 4..=6 {
            state.kill(seat(n)).unwrap();
        }
        assert_eq!(state.check_win(), Some(Faction::Wolves));
    }

    #[test]
    fn test_check_win_is_idempotent() {
        let mut state = state();
        state.kill(seat(1)).unwrap();
        let first = state.check_win();
        let second = state.check_win();
        assert_eq!(first, second);
        assert_eq!(first.is_some(), state.is_over());

        for n in 2..=3 {
            state.kill(seat(n)).unwrap();
        }
        assert_eq!(state.check_win(), Some(Faction::Villagers));
        assert_eq!(state.check_win(), Some(Faction::Villagers));
        assert_eq!(state.winner(), Some(Faction::Villagers));
    }

    #[test]
    fn test_potions_are_single_use() {
        let mut state = state();
        let witch = seat(8);
        assert!(state.consume_antidote(witch).is_ok());
        assert!(state.consume_antidote(witch).is_err());
        assert!(state.consume_poison(witch).is_ok());
        assert!(state.consume_poison(witch).is_err());
        // Non-witches never hold potions
        assert!(state.consume_poison(seat(1)).is_err());
    }

    #[test]
    fn test_advance_day_clears_pending() {
        let mut state = state();
        state.set_wolf_kill(Some(seat(4)));
        state.set_phase(Phase::DayExecution);
        state.advance_day();
        assert_eq!(state.day(), 2);
        assert_eq!(state.phase(), Phase::NightSeer);
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_retaliation_causes() {
        assert!(DeathCause::WolfKill.allows_retaliation());
        assert!(DeathCause::Execution.allows_retaliation());
        assert!(!DeathCause::Poison.allows_retaliation());
        assert!(!DeathCause::HunterShot.allows_retaliation());
    }
}
