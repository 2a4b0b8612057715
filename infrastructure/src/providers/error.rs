//! Error types for seat providers

use thiserror::Error;
use werewolf_application::DecisionError;
use werewolf_domain::{SEAT_COUNT, SeatId};

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while building or calling a seat provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no message")]
    EmptyResponse,

    #[error("Expected {max} seat providers, got {0}", max = SEAT_COUNT)]
    SeatCount(usize),

    #[error("Seat {seat} is misconfigured: {reason}")]
    SeatConfig { seat: SeatId, reason: String },
}

impl From<ProviderError> for DecisionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) if e.is_timeout() => DecisionError::Timeout,
            ProviderError::SeatConfig { .. } | ProviderError::SeatCount(_) => {
                DecisionError::Unavailable(err.to_string())
            }
            other => DecisionError::Transport(other.to_string()),
        }
    }
}
