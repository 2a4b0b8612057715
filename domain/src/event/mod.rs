//! Engine events and the per-match log
//!
//! Events are immutable records of what happened, in the order it
//! happened. Each one carries the seat ids, roles and text needed to render
//! it, so consumers never have to look at game state.

pub mod entities;
pub mod log;

pub use entities::{
    EventEnvelope, GameEvent, SeatInfo, SpeechKind, VoteKind, VoteOutcome, WitchAction,
};
pub use log::{LogEntry, MatchLog};
