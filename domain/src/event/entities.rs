//! Game event entities

use crate::core::seat::SeatId;
use crate::decision::DecisionKind;
use crate::game::{DeathCause, Phase, Standing};
use crate::role::{Faction, Role};
use crate::vote::{AwardBallot, Ballot};
use serde::{Deserialize, Serialize};

/// Seat roster entry published at match start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub seat: SeatId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechKind {
    WolfDiscussion,
    Discussion,
    LastWords,
}

impl SpeechKind {
    pub fn label(&self) -> &'static str {
        match self {
            SpeechKind::WolfDiscussion => "whispers to the pack",
            SpeechKind::Discussion => "says",
            SpeechKind::LastWords => "last words",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    WolfKill,
    Execution,
}

/// How a vote was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VoteOutcome {
    /// A target was chosen; `tie_broken` is set when it was drawn from a tie
    Chosen { target: SeatId, tie_broken: bool },
    /// Every vote abstained or was invalid
    NoVotes,
    /// Two or more leaders at a day vote
    Tie,
    /// Abstentions at least matched the leader at a day vote
    AbstainMajority,
}

impl VoteOutcome {
    pub fn target(&self) -> Option<SeatId> {
        match self {
            VoteOutcome::Chosen { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// What the witch did on one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WitchAction {
    Saved { target: SeatId },
    LetDie { target: SeatId },
    Poisoned { target: SeatId },
    HeldPoison,
}

/// One observable occurrence in a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    MatchStarted {
        match_number: u32,
        total_matches: u32,
        seats: Vec<SeatInfo>,
    },
    PhaseBoundary {
        day: u32,
        phase: Phase,
    },
    Reveal {
        seer: SeatId,
        target: SeatId,
        faction: Faction,
    },
    Speech {
        seat: SeatId,
        speech: SpeechKind,
        text: String,
    },
    WitchDecision {
        witch: SeatId,
        #[serde(flatten)]
        decision: WitchAction,
    },
    VoteTally {
        vote: VoteKind,
        ballots: Vec<Ballot>,
        winners: Vec<SeatId>,
        max_votes: usize,
        abstain_count: usize,
        outcome: VoteOutcome,
    },
    Death {
        seat: SeatId,
        role: Role,
        cause: DeathCause,
    },
    Retaliation {
        hunter: SeatId,
        target: SeatId,
    },
    NoAction {
        seat: SeatId,
        decision: DecisionKind,
    },
    FactionResult {
        winner: Faction,
        day: u32,
        roles: Vec<Role>,
    },
    AwardTally {
        ballots: Vec<AwardBallot>,
    },
    AwardResult {
        mvp: Option<SeatId>,
        lvp: Option<SeatId>,
        standings: Vec<Standing>,
    },
    MatchAborted {
        match_number: u32,
        reason: String,
    },
    TournamentFinished {
        standings: Vec<Standing>,
        champion: SeatId,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::MatchStarted { .. } => "match_started",
            GameEvent::PhaseBoundary { .. } => "phase_boundary",
            GameEvent::Reveal { .. } => "reveal",
            GameEvent::Speech { .. } => "speech",
            GameEvent::WitchDecision { .. } => "witch_decision",
            GameEvent::VoteTally { .. } => "vote_tally",
            GameEvent::Death { .. } => "death",
            GameEvent::Retaliation { .. } => "retaliation",
            GameEvent::NoAction { .. } => "no_action",
            GameEvent::FactionResult { .. } => "faction_result",
            GameEvent::AwardTally { .. } => "award_tally",
            GameEvent::AwardResult { .. } => "award_result",
            GameEvent::MatchAborted { .. } => "match_aborted",
            GameEvent::TournamentFinished { .. } => "tournament_finished",
        }
    }

    /// Plain-text, single-line description used by the match log and the
    /// post-match reveal
    pub fn narrative(&self) -> String {
        match self {
            GameEvent::MatchStarted {
                match_number,
                total_matches,
                ..
            } => format!("Match {match_number} of {total_matches} begins."),
            GameEvent::PhaseBoundary { day, phase } => {
                let half = if phase.is_night() { "Night" } else { "Day" };
                format!("{half} {day}: {}", phase.display_name())
            }
            GameEvent::Reveal {
                seer,
                target,
                faction,
            } => {
                let verdict = match faction {
                    Faction::Wolves => "a wolf",
                    Faction::Villagers => "good",
                };
                format!("Seat {seer} (Seer) checked seat {target}: {verdict}.")
            }
            GameEvent::Speech { seat, speech, text } => {
                format!("Seat {seat} {}: {text}", speech.label())
            }
            GameEvent::WitchDecision { witch, decision } => match decision {
                WitchAction::Saved { target } => {
                    format!("Seat {witch} (Witch) used the antidote on seat {target}.")
                }
                WitchAction::LetDie { target } => {
                    format!("Seat {witch} (Witch) did not save seat {target}.")
                }
                WitchAction::Poisoned { target } => {
                    format!("Seat {witch} (Witch) poisoned seat {target}.")
                }
                WitchAction::HeldPoison => format!("Seat {witch} (Witch) held the poison."),
            },
            GameEvent::VoteTally {
                vote,
                ballots,
                outcome,
                ..
            } => {
                let cast = ballots
                    .iter()
                    .map(|b| match b.target {
                        Some(target) => format!("{}→{}", b.voter, target),
                        None => format!("{}→abstain", b.voter),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let label = match vote {
                    VoteKind::WolfKill => "Wolf vote",
                    VoteKind::Execution => "Day vote",
                };
                let result = match outcome {
                    VoteOutcome::Chosen {
                        target,
                        tie_broken: true,
                    } => format!("seat {target} (drawn from a tie)"),
                    VoteOutcome::Chosen { target, .. } => format!("seat {target}"),
                    VoteOutcome::NoVotes => "nobody".to_string(),
                    VoteOutcome::Tie => "tie, nobody executed".to_string(),
                    VoteOutcome::AbstainMajority => {
                        "too many abstentions, nobody executed".to_string()
                    }
                };
                format!("{label} [{cast}]: {result}.")
            }
            GameEvent::Death { seat, role, cause } => {
                format!("Seat {seat} ({role}) was {}.", cause.display_name())
            }
            GameEvent::Retaliation { hunter, target } => {
                format!("Seat {hunter} (Hunter) shoots seat {target}.")
            }
            GameEvent::NoAction { seat, decision } => {
                format!("Seat {seat} took no action for {}.", decision.description())
            }
            GameEvent::FactionResult { winner, day, .. } => {
                format!("{} win on day {day}.", winner.display_name())
            }
            GameEvent::AwardTally { ballots } => {
                let cast = ballots
                    .iter()
                    .map(|b| format!("{}: MVP {} / LVP {}", b.voter, b.mvp, b.lvp))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Award ballots [{cast}].")
            }
            GameEvent::AwardResult { mvp, lvp, .. } => format!(
                "MVP: {}, LVP: {}.",
                seat_or_nobody(*mvp),
                seat_or_nobody(*lvp)
            ),
            GameEvent::MatchAborted {
                match_number,
                reason,
            } => format!("Match {match_number} aborted: {reason}"),
            GameEvent::TournamentFinished { champion, .. } => {
                format!("Tournament over. Champion: seat {champion}.")
            }
        }
    }
}

fn seat_or_nobody(seat: Option<SeatId>) -> String {
    seat.map_or_else(|| "nobody".to_string(), |s| format!("seat {s}"))
}

/// An event stamped with its position in the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub seq: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}
