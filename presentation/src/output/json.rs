//! JSON lines output

use crate::board::BoardState;
use crate::output::formatter::EventFormatter;
use werewolf_domain::EventEnvelope;

/// One compact JSON object per event
pub struct JsonFormatter;

impl EventFormatter for JsonFormatter {
    fn format_event(&mut self, envelope: &EventEnvelope, _board: &BoardState) -> Option<String> {
        serde_json::to_string(envelope).ok()
    }

    fn format_summary(&mut self, _board: &BoardState) -> Option<String> {
        None
    }
}
