//! Decision provider port
//!
//! Defines how the engine talks to whatever controls a seat: a language
//! model client, a scripted bot, or a human at a prompt.

use async_trait::async_trait;
use thiserror::Error;
use werewolf_domain::{DecisionRequest, SeatBriefing, SeatId};

/// Errors a provider can report for a single `ask`
#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Timeout")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Seat unavailable: {0}")]
    Unavailable(String),
}

/// Per-seat decision source
///
/// `tell` is a one-way broadcast of public information and never fails
/// observably. `ask` may block for seconds and may return text that does not
/// parse; the engine bounds it with a timeout and treats both failures as
/// "no action".
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Private match-start briefing for a seat
    ///
    /// Called once per seat before the first night. Providers that keep a
    /// conversation per seat reset it here.
    async fn begin_match(&self, _briefing: &SeatBriefing) {}

    /// Share new public information with a seat
    async fn tell(&self, seat: SeatId, message: &str);

    /// Ask a seat for a decision and return its raw answer
    async fn ask(&self, seat: SeatId, request: &DecisionRequest) -> Result<String, DecisionError>;
}
