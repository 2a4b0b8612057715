//! Decision request value objects

use crate::core::seat::SeatId;
use crate::role::{Role, RoleComposition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a seat is being asked to decide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionKind {
    SeerCheck,
    WolfDiscussion,
    WolfVote,
    WitchAntidote { victim: SeatId },
    WitchPoison,
    HunterShot,
    Discussion,
    LastWords,
    DayVote,
    AwardBallot,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::SeerCheck => "seer_check",
            DecisionKind::WolfDiscussion => "wolf_discussion",
            DecisionKind::WolfVote => "wolf_vote",
            DecisionKind::WitchAntidote { .. } => "witch_antidote",
            DecisionKind::WitchPoison => "witch_poison",
            DecisionKind::HunterShot => "hunter_shot",
            DecisionKind::Discussion => "discussion",
            DecisionKind::LastWords => "last_words",
            DecisionKind::DayVote => "day_vote",
            DecisionKind::AwardBallot => "award_ballot",
        }
    }

    /// Short phrase used in "no action" narrative
    pub fn description(&self) -> &'static str {
        match self {
            DecisionKind::SeerCheck => "the seer's check",
            DecisionKind::WolfDiscussion => "the wolf discussion",
            DecisionKind::WolfVote => "the wolf vote",
            DecisionKind::WitchAntidote { .. } => "the antidote",
            DecisionKind::WitchPoison => "the poison",
            DecisionKind::HunterShot => "the hunter's shot",
            DecisionKind::Discussion => "the discussion",
            DecisionKind::LastWords => "last words",
            DecisionKind::DayVote => "the day vote",
            DecisionKind::AwardBallot => "the award ballot",
        }
    }

    /// Free-text answers that are broadcast rather than parsed
    pub fn is_speech(&self) -> bool {
        matches!(
            self,
            DecisionKind::WolfDiscussion | DecisionKind::Discussion | DecisionKind::LastWords
        )
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single question put to one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub kind: DecisionKind,
    pub prompt: String,
}

impl DecisionRequest {
    pub fn new(kind: DecisionKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
        }
    }
}

/// Private match-start information for one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatBriefing {
    pub seat: SeatId,
    pub role: Role,
    /// The other wolves; empty for everyone else
    pub wolf_teammates: Vec<SeatId>,
    pub composition: RoleComposition,
}
