//! Day phases: dawn, retaliation, last words, discussion, vote, execution

use super::{Flow, MatchError, PhaseEngine};
use crate::ports::decision_provider::DecisionProvider;
use crate::use_cases::resolve_action::RoleActionResolver;
use tracing::info;
use werewolf_domain::decision::{parse_target, parse_vote};
use werewolf_domain::{
    Ballot, Death, DecisionKind, GameEvent, Phase, PromptTemplate, SeatId, SpeechKind, VoteChoice,
    VoteKind,
};

impl<P: DecisionProvider + ?Sized> PhaseEngine<'_, P> {
    /// Run the day. Returns `Flow::Over` as soon as a death ends the match.
    pub(super) async fn day(&mut self) -> Result<Flow, MatchError> {
        let pending = self.state.pending();
        // Discussion starts after the first seat named for death tonight
        let first_death = pending.wolf_kill.or(pending.poison);

        self.enter_phase(Phase::DayAnnounce).await;
        let deaths = RoleActionResolver::apply_dawn(&mut self.state)?;
        self.tell_all(&PromptTemplate::dawn(self.state.day(), &deaths))
            .await;
        for death in &deaths {
            self.emit_death(death);
        }
        if let Flow::Over(winner) = self.check_win() {
            return Ok(Flow::Over(winner));
        }

        let mut night_dead: Vec<SeatId> = deaths.iter().map(|d| d.seat).collect();
        if let Some(hunter) = deaths
            .iter()
            .find(|d| RoleActionResolver::grants_retaliation(d))
            .map(|d| d.seat)
            && let Some(shot) = self.retaliation(hunter).await?
        {
            if let Flow::Over(winner) = self.check_win() {
                return Ok(Flow::Over(winner));
            }
            night_dead.push(shot);
        }

        if self.state.day() == 1 && !night_dead.is_empty() {
            night_dead.sort();
            self.enter_phase(Phase::DayLastWords).await;
            for seat in night_dead {
                self.public_speech(seat, SpeechKind::LastWords).await;
            }
        }

        self.discussion(first_death).await;
        let target = self.day_vote().await?;
        self.execution(target).await
    }

    async fn discussion(&mut self, first_death: Option<SeatId>) {
        self.enter_phase(Phase::DayDiscussion).await;
        self.tell_all(PromptTemplate::discussion_begins()).await;

        let order: Vec<SeatId> = match first_death {
            Some(seat) => seat.clockwise_after().collect(),
            None => SeatId::all().collect(),
        };
        for seat in order {
            if self.state.is_alive(seat) {
                self.public_speech(seat, SpeechKind::Discussion).await;
            }
        }
    }

    /// Every living seat votes once; returns the seat to execute, if any
    async fn day_vote(&mut self) -> Result<Option<SeatId>, MatchError> {
        self.enter_phase(Phase::DayVote).await;

        let kind = DecisionKind::DayVote;
        let mut ballots = Vec::new();
        for voter in self.state.living_seats() {
            let target = match self.ask(voter, kind, parse_vote).await {
                Ok(VoteChoice::Target(target)) => self.checked_vote(voter, kind, target)?,
                Ok(VoteChoice::Abstain) => None,
                Err(_) => {
                    self.no_action(voter, kind);
                    None
                }
            };
            ballots.push(Ballot::new(voter, target));
        }

        let (result, outcome) = RoleActionResolver::resolve_day_vote(&ballots);
        let cast: Vec<(SeatId, Option<SeatId>)> =
            ballots.iter().map(|b| (b.voter, b.target)).collect();
        self.emit_tally(VoteKind::Execution, ballots, &result, outcome);
        self.tell_all(&PromptTemplate::votes_cast(&cast)).await;
        self.tell_all(&PromptTemplate::execution(outcome.target()))
            .await;

        Ok(outcome.target())
    }

    async fn execution(&mut self, target: Option<SeatId>) -> Result<Flow, MatchError> {
        self.enter_phase(Phase::DayExecution).await;
        let Some(target) = target else {
            info!("Day {}: nobody executed", self.state.day());
            return Ok(Flow::Continue);
        };

        let death = RoleActionResolver::apply_execution(&mut self.state, target)?;
        self.emit_death(&death);
        if let Flow::Over(winner) = self.check_win() {
            return Ok(Flow::Over(winner));
        }

        let mut speakers = vec![target];
        if RoleActionResolver::grants_retaliation(&death)
            && let Some(shot) = self.retaliation(target).await?
        {
            if let Flow::Over(winner) = self.check_win() {
                return Ok(Flow::Over(winner));
            }
            speakers.push(shot);
        }

        self.enter_phase(Phase::DayLastWords).await;
        for seat in speakers {
            self.public_speech(seat, SpeechKind::LastWords).await;
        }
        Ok(Flow::Continue)
    }

    /// The dead hunter's one shot. Returns the seat shot, if any.
    async fn retaliation(&mut self, hunter: SeatId) -> Result<Option<SeatId>, MatchError> {
        self.enter_phase(Phase::DayHunterRetaliation).await;

        let kind = DecisionKind::HunterShot;
        let Ok(target) = self.ask(hunter, kind, parse_target).await else {
            self.no_action(hunter, kind);
            return Ok(None);
        };
        match RoleActionResolver::apply_retaliation(&mut self.state, hunter, target) {
            Ok(death) => {
                self.emit(GameEvent::Retaliation { hunter, target });
                self.emit_death(&death);
                self.tell_all(&PromptTemplate::hunter_shot_announce(hunter, target))
                    .await;
                Ok(Some(target))
            }
            Err(e) => self.recover(hunter, kind, e).map(|()| None),
        }
    }

    fn emit_death(&mut self, death: &Death) {
        info!(
            "Seat {} ({}) died: {}",
            death.seat,
            death.role,
            death.cause.display_name()
        );
        self.emit(GameEvent::Death {
            seat: death.seat,
            role: death.role,
            cause: death.cause,
        });
    }
}
