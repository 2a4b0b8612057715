//! Application layer for ai-werewolf
//!
//! This crate contains the phase engine, the tournament orchestrator, the
//! ports they talk through, and application configuration. It depends only
//! on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EngineParams, TournamentConfig, TournamentConfigError, parse_matches};
pub use ports::{
    decision_provider::{DecisionError, DecisionProvider},
    event_channel::{ChannelState, EventReceiver, EventSender, event_channel},
};
pub use use_cases::resolve_action::{ResolveError, RoleActionResolver};
pub use use_cases::run_match::{MatchError, MatchReport, PhaseEngine};
pub use use_cases::run_tournament::{MatchOrchestrator, MatchSummary, TournamentReport};
pub use use_cases::shared::DecisionFailure;
