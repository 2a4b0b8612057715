//! Event formatter trait

use crate::board::BoardState;
use werewolf_domain::EventEnvelope;

/// Turns stream events into printable lines
pub trait EventFormatter: Send {
    /// Render one event, already folded into `board`; `None` skips it
    fn format_event(&mut self, envelope: &EventEnvelope, board: &BoardState) -> Option<String>;

    /// Closing block printed once the stream ends
    fn format_summary(&mut self, board: &BoardState) -> Option<String>;
}
