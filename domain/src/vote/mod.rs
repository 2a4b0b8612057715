//! Voting primitives
//!
//! Wolf-kill votes, day execution votes and the post-match award ballots all
//! go through [`tally`]. The tally itself never breaks ties; callers choose a
//! policy ([`TallyResult::pick_random`] at night and for awards,
//! [`TallyResult::day_execution`] during the day).

pub mod tally;

pub use tally::{AwardBallot, Ballot, TallyResult, VoteTally, tally};
