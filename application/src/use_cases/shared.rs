//! Shared utilities for use cases.
//!
//! Contains the bounded decision call used by both the phase engine and the
//! tournament's award ballots.

use crate::ports::decision_provider::{DecisionError, DecisionProvider};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use werewolf_domain::core::string::truncate;
use werewolf_domain::{DecisionKind, MalformedDecision, PromptTemplate, SeatId};

/// Why a seat's decision produced no action
///
/// Always recovered locally; never shown to other seats.
#[derive(Error, Debug)]
pub enum DecisionFailure {
    #[error("malformed decision: {0}")]
    Malformed(#[from] MalformedDecision),

    #[error("decision timed out after {0:?}")]
    TimeoutExceeded(Duration),

    #[error("provider error: {0}")]
    Provider(#[from] DecisionError),
}

/// Ask a seat for a decision, bounded by `timeout`.
pub(crate) async fn ask_with_timeout<P: DecisionProvider + ?Sized>(
    provider: &P,
    seat: SeatId,
    kind: DecisionKind,
    timeout: Duration,
) -> Result<String, DecisionFailure> {
    let request = PromptTemplate::request(kind);
    match tokio::time::timeout(timeout, provider.ask(seat, &request)).await {
        Ok(Ok(answer)) => {
            debug!(
                seat = seat.get(),
                kind = kind.as_str(),
                "answer: {}",
                truncate(&answer, 200)
            );
            Ok(answer)
        }
        Ok(Err(DecisionError::Timeout)) | Err(_) => {
            warn!(
                seat = seat.get(),
                kind = kind.as_str(),
                "decision timed out after {:?}",
                timeout
            );
            Err(DecisionFailure::TimeoutExceeded(timeout))
        }
        Ok(Err(e)) => {
            warn!(seat = seat.get(), kind = kind.as_str(), "provider error: {}", e);
            Err(DecisionFailure::Provider(e))
        }
    }
}

/// Ask and parse in one step.
pub(crate) async fn ask_parsed<P, T>(
    provider: &P,
    seat: SeatId,
    kind: DecisionKind,
    timeout: Duration,
    parse: fn(&str) -> Result<T, MalformedDecision>,
) -> Result<T, DecisionFailure>
where
    P: DecisionProvider + ?Sized,
{
    let answer = ask_with_timeout(provider, seat, kind, timeout).await?;
    parse(&answer).map_err(|e| {
        debug!(
            seat = seat.get(),
            kind = kind.as_str(),
            "malformed ({}): {}",
            e,
            truncate(&answer, 80)
        );
        DecisionFailure::Malformed(e)
    })
}
