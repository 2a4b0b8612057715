//! Raw TOML configuration data types
//!
//! These structs mirror the exact structure of the TOML config file and are
//! deserialized directly. Converting them into application parameters is
//! left to the binary.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use werewolf_domain::{OutputFormat, SEAT_COUNT, SeatId};

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("tournament.matches cannot be 0")]
    ZeroMatches,

    #[error("engine.decision_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("engine.max_days cannot be 0")]
    InvalidMaxDays,

    #[error("at most {max} [[seats]] entries are allowed, got {0}", max = SEAT_COUNT)]
    TooManySeats(usize),

    #[error("seat {seat}: openai provider requires `{field}`")]
    MissingSeatField { seat: SeatId, field: &'static str },
}

/// `[tournament]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileTournamentConfig {
    /// Number of matches to play
    pub matches: u32,
}

impl Default for FileTournamentConfig {
    fn default() -> Self {
        Self { matches: 1 }
    }
}

/// `[engine]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Upper bound on a single seat decision
    pub decision_timeout_seconds: u64,
    /// Pause after each phase boundary
    pub phase_delay_millis: u64,
    /// Matches still undecided on this day are aborted
    pub max_days: u32,
    /// Fixed RNG seed for reproducible role shuffles and tie-breaks
    pub seed: Option<u64>,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            decision_timeout_seconds: 60,
            phase_delay_millis: 0,
            max_days: 20,
            seed: None,
        }
    }
}

impl FileEngineConfig {
    pub fn decision_timeout(&self) -> Duration {
        Duration::from_secs(self.decision_timeout_seconds)
    }

    pub fn phase_delay(&self) -> Duration {
        Duration::from_millis(self.phase_delay_millis)
    }
}

/// `[presentation]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilePresentationConfig {
    /// Consumer poll interval
    pub tick_millis: u64,
    /// Enable colored terminal output
    pub color: bool,
    /// Text narrative or JSON lines
    pub format: OutputFormat,
}

impl Default for FilePresentationConfig {
    fn default() -> Self {
        Self {
            tick_millis: 100,
            color: true,
            format: OutputFormat::Text,
        }
    }
}

/// Which agent drives a seat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeatProviderKind {
    /// Seeded random bot, needs no network
    #[default]
    Bot,
    /// OpenAI-compatible chat completions endpoint
    OpenAi,
}

/// One `[[seats]]` entry
///
/// # Example
///
/// ```toml
/// [[seats]]
/// name = "Aster"
/// provider = "openai"
/// model = "gpt-4o-mini"
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSeatConfig {
    pub name: Option<String>,
    pub provider: SeatProviderKind,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub temperature: Option<f32>,
}

impl Default for FileSeatConfig {
    fn default() -> Self {
        Self {
            name: None,
            provider: SeatProviderKind::Bot,
            model: None,
            base_url: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: None,
        }
    }
}

impl FileSeatConfig {
    /// Random bot filling an unconfigured seat
    pub fn bot_for(seat: SeatId) -> Self {
        Self {
            name: Some(format!("Bot-{}", seat)),
            ..Self::default()
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub tournament: FileTournamentConfig,
    pub engine: FileEngineConfig,
    pub presentation: FilePresentationConfig,
    pub seats: Vec<FileSeatConfig>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.tournament.matches == 0 {
            return Err(ConfigValidationError::ZeroMatches);
        }
        if self.engine.decision_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.engine.max_days == 0 {
            return Err(ConfigValidationError::InvalidMaxDays);
        }
        if self.seats.len() > SEAT_COUNT {
            return Err(ConfigValidationError::TooManySeats(self.seats.len()));
        }

        for (seat, entry) in SeatId::all().zip(&self.seats) {
            if entry.provider != SeatProviderKind::OpenAi {
                continue;
            }
            if entry.model.as_deref().is_none_or(|m| m.trim().is_empty()) {
                return Err(ConfigValidationError::MissingSeatField {
                    seat,
                    field: "model",
                });
            }
            if entry.base_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
                return Err(ConfigValidationError::MissingSeatField {
                    seat,
                    field: "base_url",
                });
            }
        }

        Ok(())
    }

    /// All nine seats in order, unconfigured ones filled with random bots
    pub fn resolved_seats(&self) -> Vec<(SeatId, FileSeatConfig)> {
        SeatId::all()
            .map(|seat| {
                let mut entry = self
                    .seats
                    .get(seat.index())
                    .cloned()
                    .unwrap_or_else(|| FileSeatConfig::bot_for(seat));
                if entry.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
                    entry.name = Some(format!("Bot-{}", seat));
                }
                (seat, entry)
            })
            .collect()
    }

    /// Display names for all nine seats
    pub fn seat_names(&self) -> Vec<String> {
        self.resolved_seats()
            .into_iter()
            .map(|(seat, entry)| entry.name.unwrap_or_else(|| format!("Bot-{}", seat)))
            .collect()
    }
}
