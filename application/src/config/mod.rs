//! Application-level configuration.
//!
//! - [`EngineParams`]: per-match engine control (decision timeout, pacing, seed)
//! - [`TournamentConfig`]: how many matches, which roles, and seat names

pub mod engine_params;
pub mod tournament_config;

pub use engine_params::EngineParams;
pub use tournament_config::{TournamentConfig, TournamentConfigError, parse_matches};
