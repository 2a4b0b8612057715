//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Seat {0} is outside the table (1-9)")]
    InvalidSeat(usize),

    #[error("Role composition must cover {expected} seats, got {actual}")]
    CompositionSize { expected: usize, actual: usize },

    #[error("Role composition needs {expected} {role}, got {actual}")]
    CompositionRoles {
        role: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    /// Create an invariant violation with a diagnostic message
    pub fn invariant(message: impl Into<String>) -> Self {
        DomainError::InvariantViolation(message.into())
    }

    /// Check if this error is fatal to the running match
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            DomainError::InvariantViolation(_) | DomainError::InvalidSeat(_)
        )
    }
}
