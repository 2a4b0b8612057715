//! Vote counting and tie-break policies

use crate::core::seat::{SEAT_COUNT, SeatId};
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One seat's vote: a target, or `None` to abstain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: SeatId,
    pub target: Option<SeatId>,
}

impl Ballot {
    pub fn new(voter: SeatId, target: Option<SeatId>) -> Self {
        Self { voter, target }
    }

    pub fn abstain(voter: SeatId) -> Self {
        Self::new(voter, None)
    }
}

/// One seat's best/worst player pick after a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardBallot {
    pub voter: SeatId,
    pub mvp: SeatId,
    pub lvp: SeatId,
}

/// Outcome of counting a set of ballots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    /// Every candidate holding the maximum count; empty if nobody got a vote
    pub winners: BTreeSet<SeatId>,
    pub max_votes: usize,
    pub abstain_count: usize,
    /// Votes received per seat, in seat order
    pub counts: [usize; SEAT_COUNT],
}

impl TallyResult {
    /// Night and award policy: a leaderless group still acts
    ///
    /// Returns a uniformly random member of `winners`, or `None` if nobody
    /// received a vote.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SeatId> {
        self.winners.iter().copied().choose(rng)
    }

    /// Day policy: a split or abstaining village executes nobody
    ///
    /// A tie between two or more leaders is no execution regardless of the
    /// abstain count. A single leader is executed only if abstentions are
    /// strictly fewer than the leader's votes.
    pub fn day_execution(&self) -> Option<SeatId> {
        if self.winners.len() != 1 || self.abstain_count >= self.max_votes {
            return None;
        }
        self.winners.first().copied()
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn votes_for(&self, seat: SeatId) -> usize {
        self.counts[seat.index()]
    }
}

/// Accumulates ballots one at a time
///
/// # Example
///
/// ```
/// use werewolf_domain::{SeatId, vote::{Ballot, VoteTally}};
///
/// let one = SeatId::new(1).unwrap();
/// let two = SeatId::new(2).unwrap();
/// let mut tally = VoteTally::new();
/// tally.cast(Ballot::new(one, Some(two)));
/// tally.cast(Ballot::abstain(two));
///
/// let result = tally.finish();
/// assert_eq!(result.max_votes, 1);
/// assert_eq!(result.abstain_count, 1);
/// assert_eq!(result.day_execution(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    counts: [usize; SEAT_COUNT],
    abstain_count: usize,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cast(&mut self, ballot: Ballot) {
        match ballot.target {
            Some(target) => self.counts[target.index()] += 1,
            None => self.abstain_count += 1,
        }
    }

    pub fn finish(&self) -> TallyResult {
        let max_votes = self.counts.iter().copied().max().unwrap_or(0);
        let winners = if max_votes == 0 {
            BTreeSet::new()
        } else {
            SeatId::all()
                .filter(|seat| self.counts[seat.index()] == max_votes)
                .collect()
        };

        TallyResult {
            winners,
            max_votes,
            abstain_count: self.abstain_count,
            counts: self.counts,
        }
    }
}

/// Count a full set of ballots
pub fn tally<'a>(ballots: impl IntoIterator<Item = &'a Ballot>) -> TallyResult {
    let mut tally = VoteTally::new();
    for ballot in ballots {
        tally.cast(*ballot);
    }
    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seat(n: u8) -> SeatId {
        SeatId::new(n).unwrap()
    }

    fn ballots(votes: &[(u8, Option<u8>)]) -> Vec<Ballot> {
        votes
            .iter()
            .map(|&(voter, target)| Ballot::new(seat(voter), target.map(seat)))
            .collect()
    }

    #[test]
    fn test_single_leader() {
        let result = tally(&ballots(&[(1, Some(4)), (2, Some(4)), (3, Some(5))]));
        assert_eq!(result.winners, BTreeSet::from([seat(4)]));
        assert_eq!(result.max_votes, 2);
        assert_eq!(result.abstain_count, 0);
        assert_eq!(result.votes_for(seat(5)), 1);
        assert_eq!(result.day_execution(), Some(seat(4)));
    }

    #[test]
    fn test_all_abstain_has_no_winners() {
        let result = tally(&ballots(&[(1, None), (2, None), (3, None)]));
        assert!(result.winners.is_empty());
        assert_eq!(result.max_votes, 0);
        assert_eq!(result.abstain_count, 3);
        assert_eq!(result.day_execution(), None);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(result.pick_random(&mut rng), None);
    }

    #[test]
    fn test_two_way_tie_executes_nobody() {
        // 4 for seat 3, 4 for seat 5, 1 abstain
        let result = tally(&ballots(&[
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
        assert_eq!(result.winners, BTreeSet::from([seat(3), seat(5)]));
        assert_eq!(result.max_votes, 4);
        assert!(result.is_tie());
        assert_eq!(result.day_execution(), None);
    }

    #[test]
    fn test_abstain_majority_executes_nobody() {
        // 5 abstain, 4 for seat 1
        let result = tally(&ballots(&[
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
        assert_eq!(result.winners, BTreeSet::from([seat(1)]));
        assert_eq!(result.abstain_count, 5);
        assert_eq!(result.max_votes, 4);
        assert_eq!(result.day_execution(), None);
    }

    #[test]
    fn test_abstain_equal_to_leader_executes_nobody() {
        let result = tally(&ballots(&[(1, None), (2, None), (3, Some(9)), (4, Some(9))]));
        assert_eq!(result.day_execution(), None);
    }

    #[test]
    fn test_random_pick_is_always_a_winner() {
        let result = tally(&ballots(&[(1, Some(4)), (2, Some(6)), (3, Some(8))]));
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let pick = result.pick_random(&mut rng).unwrap();
            assert!(result.winners.contains(&pick));
            seen.insert(pick);
        }
        assert_eq!(seen, result.winners);
    }

    #[test]
    fn test_abstentions_do_not_count_toward_candidates() {
        let result = tally(&ballots(&[(1, None), (2, Some(2))]));
        assert_eq!(result.counts.iter().sum::<usize>(), 1);
        assert_eq!(result.abstain_count, 1);
    }
}
