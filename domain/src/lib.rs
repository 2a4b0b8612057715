//! Domain layer for ai-werewolf
//!
//! This crate contains the rules of the game: seats and roles, the mutable
//! match state, vote counting, decision parsing, and the events a match
//! produces. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Match
//!
//! Nine seats are dealt a shuffled [`RoleComposition`] (3 Wolf, 3 Villager,
//! Seer, Witch, Hunter). A [`GameState`] tracks who is alive, the phase,
//! and the deaths decided during the night.
//!
//! ## Decisions
//!
//! Seat agents answer in free text. The [`decision`] module is the one
//! place where that text is turned into typed choices; anything it cannot
//! understand becomes a [`MalformedDecision`] and is treated as no action.
//!
//! ## Events
//!
//! Everything observable is published as a [`GameEvent`], in order.

pub mod config;
pub mod core;
pub mod decision;
pub mod event;
pub mod game;
pub mod prompt;
pub mod role;
pub mod vote;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    seat::{SEAT_COUNT, SeatId},
};
pub use decision::{
    AwardPick, Consent, DecisionKind, DecisionRequest, MalformedDecision, PoisonChoice,
    SeatBriefing, VoteChoice,
};
pub use event::{
    EventEnvelope, GameEvent, MatchLog, SeatInfo, SpeechKind, VoteKind, VoteOutcome, WitchAction,
};
pub use game::{
    Death, DeathCause, FACTION_WIN_BONUS, GameState, LVP_PENALTY, MVP_BONUS, PendingDeaths, Phase,
    Player, Potions, Scoreboard, Standing,
};
pub use prompt::PromptTemplate;
pub use role::{Faction, Role, RoleAssignment, RoleCapabilities, RoleComposition, WinGroup};
pub use vote::{AwardBallot, Ballot, TallyResult, VoteTally};
