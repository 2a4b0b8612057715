//! Role action resolver
//!
//! Applies one validated role ability to the game state. Every irrevocable
//! effect (a death, a potion, a resolved vote) goes through here exactly
//! once. Illegal targets are reported as [`ResolveError::IllegalTarget`],
//! which the engine turns into "no action"; anything else is an invariant
//! violation and aborts the match.

use rand::Rng;
use thiserror::Error;
use werewolf_domain::vote::tally;
use werewolf_domain::{
    Ballot, Death, DeathCause, DomainError, Faction, GameState, Role, SeatId, TallyResult,
    VoteOutcome,
};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("seat {seat} is not a legal target: {reason}")]
    IllegalTarget { seat: SeatId, reason: &'static str },

    #[error(transparent)]
    Invariant(#[from] DomainError),
}

impl ResolveError {
    fn illegal(seat: SeatId, reason: &'static str) -> Self {
        ResolveError::IllegalTarget { seat, reason }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::Invariant(_))
    }
}

/// Stateless rules for applying role abilities
pub struct RoleActionResolver;

impl RoleActionResolver {
    /// The seer learns the target's faction. The target must be another
    /// living seat.
    pub fn seer_check(
        state: &GameState,
        seer: SeatId,
        target: SeatId,
    ) -> Result<Faction, ResolveError> {
        if target == seer {
            return Err(ResolveError::illegal(target, "the seer cannot check themself"));
        }
        if !state.is_alive(target) {
            return Err(ResolveError::illegal(target, "already dead"));
        }
        Ok(state.player(target).role.faction())
    }

    /// Wolf and day votes may only name living seats
    pub fn validate_vote(state: &GameState, target: SeatId) -> Result<SeatId, ResolveError> {
        if state.is_alive(target) {
            Ok(target)
        } else {
            Err(ResolveError::illegal(target, "already dead"))
        }
    }

    /// Resolve the wolf vote, breaking ties at random, and record the kill
    pub fn resolve_wolf_vote<R: Rng + ?Sized>(
        state: &mut GameState,
        ballots: &[Ballot],
        rng: &mut R,
    ) -> (TallyResult, VoteOutcome) {
        let result = tally(ballots);
        let outcome = match result.pick_random(rng) {
            Some(target) => VoteOutcome::Chosen {
                target,
                tie_broken: result.is_tie(),
            },
            None => VoteOutcome::NoVotes,
        };
        state.set_wolf_kill(outcome.target());
        (result, outcome)
    }

    /// Resolve the day vote: a tie or abstain majority executes nobody
    pub fn resolve_day_vote(ballots: &[Ballot]) -> (TallyResult, VoteOutcome) {
        let result = tally(ballots);
        let outcome = if result.winners.is_empty() {
            VoteOutcome::NoVotes
        } else if result.is_tie() {
            VoteOutcome::Tie
        } else {
            match result.day_execution() {
                Some(target) => VoteOutcome::Chosen {
                    target,
                    tie_broken: false,
                },
                None => VoteOutcome::AbstainMajority,
            }
        };
        (result, outcome)
    }

    /// Save tonight's wolf target. Returns the saved seat.
    pub fn apply_antidote(state: &mut GameState, witch: SeatId) -> Result<SeatId, ResolveError> {
        let target = state
            .pending()
            .wolf_kill
            .ok_or_else(|| DomainError::invariant("antidote used with no wolf kill pending"))?;
        state.consume_antidote(witch)?;
        state.set_wolf_kill(None);
        Ok(target)
    }

    /// Poison a living seat; the witch may poison themself
    pub fn apply_poison(
        state: &mut GameState,
        witch: SeatId,
        target: SeatId,
    ) -> Result<(), ResolveError> {
        if !state.is_alive(target) {
            return Err(ResolveError::illegal(target, "already dead"));
        }
        state.consume_poison(witch)?;
        state.set_poison(Some(target));
        Ok(())
    }

    /// Apply tonight's pending deaths
    ///
    /// Both deaths are simultaneous; a seat named twice dies once, as
    /// poisoned.
    pub fn apply_dawn(state: &mut GameState) -> Result<Vec<Death>, ResolveError> {
        state
            .pending()
            .victims()
            .into_iter()
            .map(|(seat, cause)| Self::apply_death(state, seat, cause))
            .collect()
    }

    pub fn apply_execution(state: &mut GameState, target: SeatId) -> Result<Death, ResolveError> {
        Self::apply_death(state, target, DeathCause::Execution)
    }

    /// The dead hunter shoots another living seat
    pub fn apply_retaliation(
        state: &mut GameState,
        hunter: SeatId,
        target: SeatId,
    ) -> Result<Death, ResolveError> {
        let shooter = state.player(hunter);
        if !shooter.role.capabilities().can_retaliate || shooter.alive {
            return Err(DomainError::invariant(format!(
                "seat {hunter} cannot retaliate"
            ))
            .into());
        }
        if target == hunter {
            return Err(ResolveError::illegal(target, "the hunter cannot shoot themself"));
        }
        if !state.is_alive(target) {
            return Err(ResolveError::illegal(target, "already dead"));
        }
        Self::apply_death(state, target, DeathCause::HunterShot)
    }

    /// Whether a death grants the hunter a retaliation turn
    pub fn grants_retaliation(death: &Death) -> bool {
        death.role == Role::Hunter && death.cause.allows_retaliation()
    }

    fn apply_death(
        state: &mut GameState,
        seat: SeatId,
        cause: DeathCause,
    ) -> Result<Death, ResolveError> {
        if !state.kill(seat)? {
            return Err(DomainError::invariant(format!(
                "seat {seat} was already dead when {cause:?} was applied"
            ))
            .into());
        }
        Ok(Death {
            seat,
            role: state.player(seat).role,
            cause,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;
    use werewolf_domain::RoleAssignment;

    fn seat(n: u8) -> SeatId {
        SeatId::new(n).unwrap()
    }

    /// W W W V V V Hunter Witch Seer
    fn state() -> GameState {
        let assignment = RoleAssignment::from_roles(vec![
            Role::Wolf,
            Role::Wolf,
            Role::Wolf,
            Role::Villager,
            Role::Villager,
            Role::Villager,
            Role::Hunter,
            Role::Witch,
            Role::Seer,
        ])
        .unwrap();
        GameState::new(&assignment)
    }

    fn ballots(votes: &[(u8, Option<u8>)]) -> Vec<Ballot> {
        votes
            .iter()
            .map(|&(voter, target)| Ballot::new(seat(voter), target.map(seat)))
            .collect()
    }

    #[test]
    fn test_seer_check() {
        let mut state = state();
        assert_eq!(
            RoleActionResolver::seer_check(&state, seat(9), seat(2)).unwrap(),
            Faction::Wolves
        );
        assert_eq!(
            RoleActionResolver::seer_check(&state, seat(9), seat(7)).unwrap(),
            Faction::Villagers
        );
        assert!(matches!(
            RoleActionResolver::seer_check(&state, seat(9), seat(9)),
            Err(ResolveError::IllegalTarget { .. })
        ));
        state.kill(seat(4)).unwrap();
        assert!(RoleActionResolver::seer_check(&state, seat(9), seat(4)).is_err());
    }

    #[test]
    fn test_wolf_vote_tie_picks_a_leader() {
        let votes = ballots(&[(1, Some(4)), (2, Some(5)), (3, None)]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut state = state();
            let (result, outcome) =
                RoleActionResolver::resolve_wolf_vote(&mut state, &votes, &mut rng);
            let target = outcome.target().unwrap();
            assert!(result.winners.contains(&target));
            assert_eq!(state.pending().wolf_kill, Some(target));
            assert!(matches!(outcome, VoteOutcome::Chosen { tie_broken: true, .. }));
        }
    }

    #[test]
    fn test_wolf_vote_all_abstain_kills_nobody() {
        let mut state = state();
        let votes = ballots(&[(1, None), (2, None), (3, None)]);
        let mut rng = StdRng::seed_from_u64(0);
        let (_, outcome) = RoleActionResolver::resolve_wolf_vote(&mut state, &votes, &mut rng);
        assert_eq!(outcome, VoteOutcome::NoVotes);
        assert_eq!(state.pending().wolf_kill, None);
    }

    #[test]
    fn test_day_vote_outcomes() {
        let (result, outcome) = RoleActionResolver::resolve_day_vote(&ballots(&[
            (1, Some(3)),
            (2, Some(3)),
            (4, Some(3)),
            (6, Some(3)),
            (3, Some(5)),
            (5, Some(5)),
            (7, Some(5)),
            (8, Some(5)),
            (9, None),
        ]));
        assert_eq!(outcome, VoteOutcome::Tie);
        assert_eq!(result.winners, BTreeSet::from([seat(3), seat(5)]));

        let (_, outcome) = RoleActionResolver::resolve_day_vote(&ballots(&[
            (1, None),
            (2, None),
            (3, None),
            (4, None),
            (5, None),
            (6, Some(1)),
            (7, Some(1)),
            (8, Some(1)),
            (9, Some(1)),
        ]));
        assert_eq!(outcome, VoteOutcome::AbstainMajority);

        let (_, outcome) =
            RoleActionResolver::resolve_day_vote(&ballots(&[(1, Some(2)), (3, Some(2)), (4, None)]));
        assert_eq!(
            outcome,
            VoteOutcome::Chosen {
                target: seat(2),
                tie_broken: false
            }
        );

        let (_, outcome) = RoleActionResolver::resolve_day_vote(&ballots(&[(1, None)]));
        assert_eq!(outcome, VoteOutcome::NoVotes);
    }

    #[test]
    fn test_antidote_clears_wolf_kill_once() {
        let mut state = state();
        state.set_wolf_kill(Some(seat(4)));
        assert_eq!(RoleActionResolver::apply_antidote(&mut state, seat(8)).unwrap(), seat(4));
        assert_eq!(state.pending().wolf_kill, None);
        assert!(!state.player(seat(8)).has_antidote());

        state.set_wolf_kill(Some(seat(5)));
        let err = RoleActionResolver::apply_antidote(&mut state, seat(8)).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_poison_requires_living_target_and_allows_self() {
        let mut state = state();
        state.kill(seat(1)).unwrap();
        assert!(matches!(
            RoleActionResolver::apply_poison(&mut state, seat(8), seat(1)),
            Err(ResolveError::IllegalTarget { .. })
        ));
        // An illegal target does not consume the potion
        assert!(state.player(seat(8)).has_poison());

        RoleActionResolver::apply_poison(&mut state, seat(8), seat(8)).unwrap();
        assert_eq!(state.pending().poison, Some(seat(8)));
        assert!(!state.player(seat(8)).has_poison());
    }

    #[test]
    fn test_dawn_same_seat_dies_once_without_retaliation() {
        let mut state = state();
        state.set_wolf_kill(Some(seat(7)));
        state.set_poison(Some(seat(7)));
        let deaths = RoleActionResolver::apply_dawn(&mut state).unwrap();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Poison);
        assert!(!RoleActionResolver::grants_retaliation(&deaths[0]));
    }

    #[test]
    fn test_dawn_wolf_kill_on_hunter_grants_retaliation() {
        let mut state = state();
        state.set_wolf_kill(Some(seat(7)));
        state.set_poison(Some(seat(2)));
        let deaths = RoleActionResolver::apply_dawn(&mut state).unwrap();
        assert_eq!(deaths.len(), 2);
        assert!(RoleActionResolver::grants_retaliation(&deaths[0]));
        assert!(!RoleActionResolver::grants_retaliation(&deaths[1]));
    }

    #[test]
    fn test_retaliation_rules() {
        let mut state = state();
        // A living hunter cannot shoot
        assert!(
            RoleActionResolver::apply_retaliation(&mut state, seat(7), seat(2))
                .unwrap_err()
                .is_fatal()
        );

        state.kill(seat(7)).unwrap();
        assert!(matches!(
            RoleActionResolver::apply_retaliation(&mut state, seat(7), seat(7)),
            Err(ResolveError::IllegalTarget { .. })
        ));
        let death = RoleActionResolver::apply_retaliation(&mut state, seat(7), seat(2)).unwrap();
        assert_eq!(death.cause, DeathCause::HunterShot);
        assert_eq!(death.role, Role::Wolf);
        assert!(!state.is_alive(seat(2)));
    }

    #[test]
    fn test_execution_of_dead_seat_is_fatal() {
        let mut state = state();
        state.kill(seat(3)).unwrap();
        assert!(
            RoleActionResolver::apply_execution(&mut state, seat(3))
                .unwrap_err()
                .is_fatal()
        );
    }
}
