//! Run Match use case
//!
//! [`PhaseEngine`] drives one match through the night/day state machine,
//! pulling decisions from a [`DecisionProvider`] and publishing every
//! observable step to the event channel. The engine owns the
//! [`GameState`]; nothing else ever sees it.

mod day;
mod night;

use crate::config::EngineParams;
use crate::ports::decision_provider::DecisionProvider;
use crate::ports::event_channel::EventSender;
use crate::use_cases::resolve_action::{ResolveError, RoleActionResolver};
use crate::use_cases::shared::{DecisionFailure, ask_parsed};
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};
use werewolf_domain::decision::parse_speech;
use werewolf_domain::{
    Ballot, DecisionKind, DomainError, Faction, GameEvent, GameState, MalformedDecision, MatchLog,
    Phase, PromptTemplate, Role, RoleAssignment, SeatId, SpeechKind, TallyResult, VoteKind,
    VoteOutcome,
};

/// Errors that abort a match
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("no winner after {0} days")]
    DayLimitExceeded(u32),
}

impl From<DomainError> for MatchError {
    fn from(e: DomainError) -> Self {
        MatchError::InvariantViolation(e.to_string())
    }
}

/// For steps where the engine has already validated the target, so any
/// resolver error is an engine bug
impl From<ResolveError> for MatchError {
    fn from(e: ResolveError) -> Self {
        MatchError::InvariantViolation(e.to_string())
    }
}

/// A finished match
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub assignment: RoleAssignment,
    pub winner: Faction,
    pub days: u32,
    pub state: GameState,
    pub log: MatchLog,
}

/// Whether the match continues after a step
pub(crate) enum Flow {
    Continue,
    Over(Faction),
}

/// The per-match state machine
pub struct PhaseEngine<'a, P: DecisionProvider + ?Sized> {
    provider: &'a P,
    events: &'a mut EventSender,
    rng: &'a mut StdRng,
    params: &'a EngineParams,
    assignment: RoleAssignment,
    state: GameState,
    log: MatchLog,
}

impl<'a, P: DecisionProvider + ?Sized> PhaseEngine<'a, P> {
    pub fn new(
        provider: &'a P,
        events: &'a mut EventSender,
        rng: &'a mut StdRng,
        params: &'a EngineParams,
        assignment: RoleAssignment,
    ) -> Self {
        let state = GameState::new(&assignment);
        Self {
            provider,
            events,
            rng,
            params,
            assignment,
            state,
            log: MatchLog::new(),
        }
    }

    /// Run nights and days until one faction wins
    pub async fn run(mut self) -> Result<MatchReport, MatchError> {
        self.state.validate()?;

        let winner = loop {
            info!("Day {}: night begins", self.state.day());
            self.night().await?;

            if let Flow::Over(winner) = self.day().await? {
                break winner;
            }
            if self.state.day() >= self.params.max_days {
                return Err(MatchError::DayLimitExceeded(self.state.day()));
            }
            self.state.advance_day();
        };

        self.enter_phase(Phase::GameOver).await;
        self.emit(GameEvent::FactionResult {
            winner,
            day: self.state.day(),
            roles: self.assignment.roles().to_vec(),
        });
        info!("{} win on day {}", winner, self.state.day());

        Ok(MatchReport {
            assignment: self.assignment,
            winner,
            days: self.state.day(),
            state: self.state,
            log: self.log,
        })
    }

    // ==================== Helpers shared by night and day ====================

    /// Record an event in the match log and publish it
    fn emit(&mut self, event: GameEvent) {
        self.log.record(event.clone());
        self.events.publish(event);
    }

    /// Move to `phase`, publish the boundary, then pause for pacing
    async fn enter_phase(&mut self, phase: Phase) {
        debug!("Entering phase {}", phase.as_str());
        self.state.set_phase(phase);
        self.emit(GameEvent::PhaseBoundary {
            day: self.state.day(),
            phase,
        });
        if !self.params.phase_delay.is_zero() {
            tokio::time::sleep(self.params.phase_delay).await;
        }
    }

    async fn tell_all(&self, message: &str) {
        for seat in SeatId::all() {
            self.provider.tell(seat, message).await;
        }
    }

    async fn tell_seats(&self, seats: &[SeatId], message: &str) {
        for &seat in seats {
            self.provider.tell(seat, message).await;
        }
    }

    async fn ask<T>(
        &self,
        seat: SeatId,
        kind: DecisionKind,
        parse: fn(&str) -> Result<T, MalformedDecision>,
    ) -> Result<T, DecisionFailure> {
        ask_parsed(
            self.provider,
            seat,
            kind,
            self.params.decision_timeout,
            parse,
        )
        .await
    }

    /// Ask for a speech with asides stripped. `None` means no action was
    /// taken, and a `NoAction` event has been published.
    async fn ask_speech(&mut self, seat: SeatId, kind: DecisionKind) -> Option<String> {
        match self.ask(seat, kind, parse_speech).await {
            Ok(text) => Some(text),
            Err(_) => {
                self.no_action(seat, kind);
                None
            }
        }
    }

    /// A speech that every seat hears
    async fn public_speech(&mut self, seat: SeatId, kind: SpeechKind) {
        let decision = match kind {
            SpeechKind::LastWords => DecisionKind::LastWords,
            _ => DecisionKind::Discussion,
        };
        let Some(text) = self.ask_speech(seat, decision).await else {
            return;
        };
        let message = match kind {
            SpeechKind::LastWords => PromptTemplate::last_words_from(seat, &text),
            _ => PromptTemplate::speech(seat, &text),
        };
        self.emit(GameEvent::Speech {
            seat,
            speech: kind,
            text,
        });
        self.tell_all(&message).await;
    }

    fn no_action(&mut self, seat: SeatId, decision: DecisionKind) {
        self.emit(GameEvent::NoAction { seat, decision });
    }

    /// Convert a resolver error: illegal targets become no action, anything
    /// else aborts the match
    fn recover(
        &mut self,
        seat: SeatId,
        decision: DecisionKind,
        err: ResolveError,
    ) -> Result<(), MatchError> {
        match err {
            ResolveError::IllegalTarget { .. } => {
                debug!(seat = seat.get(), "{}", err);
                self.no_action(seat, decision);
                Ok(())
            }
            ResolveError::Invariant(e) => Err(e.into()),
        }
    }

    /// A vote for a dead seat counts as an abstention
    fn checked_vote(
        &mut self,
        voter: SeatId,
        decision: DecisionKind,
        target: SeatId,
    ) -> Result<Option<SeatId>, MatchError> {
        match RoleActionResolver::validate_vote(&self.state, target) {
            Ok(target) => Ok(Some(target)),
            Err(e) => self.recover(voter, decision, e).map(|()| None),
        }
    }

    fn emit_tally(
        &mut self,
        vote: VoteKind,
        ballots: Vec<Ballot>,
        result: &TallyResult,
        outcome: VoteOutcome,
    ) {
        self.emit(GameEvent::VoteTally {
            vote,
            ballots,
            winners: result.winners.iter().copied().collect(),
            max_votes: result.max_votes,
            abstain_count: result.abstain_count,
            outcome,
        });
    }

    /// The living holder of a unique role
    fn living_one(&self, role: Role) -> Option<SeatId> {
        self.state.living_with_role(role).first().copied()
    }

    fn check_win(&mut self) -> Flow {
        match self.state.check_win() {
            Some(winner) => Flow::Over(winner),
            None => Flow::Continue,
        }
    }
}

#[cfg(test)]
mod tests;
