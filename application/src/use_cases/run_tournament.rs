//! Run Tournament use case
//!
//! [`MatchOrchestrator`] runs a sequence of matches on the worker, scores
//! each one, and keeps the scoreboard for the whole tournament. It is the
//! only owner of the scoreboard and of the event sender.

use crate::config::{EngineParams, TournamentConfig};
use crate::ports::decision_provider::DecisionProvider;
use crate::ports::event_channel::EventSender;
use crate::use_cases::run_match::{MatchError, MatchReport, PhaseEngine};
use crate::use_cases::shared::ask_parsed;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{error, info, warn};
use werewolf_domain::decision::parse_award_ballot;
use werewolf_domain::vote::tally;
use werewolf_domain::{
    AwardBallot, Ballot, DecisionKind, Faction, GameEvent, PromptTemplate, RoleAssignment,
    Scoreboard, SeatBriefing, SeatId, SeatInfo, Standing,
};

/// Outcome of one scored match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_number: u32,
    pub winner: Faction,
    pub days: u32,
    pub mvp: Option<SeatId>,
    pub lvp: Option<SeatId>,
}

/// Final result of a tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentReport {
    pub matches: Vec<MatchSummary>,
    /// Match numbers that aborted and were not scored
    pub aborted: Vec<u32>,
    pub standings: Vec<Standing>,
    pub champion: SeatId,
}

/// Runs the tournament on the worker
pub struct MatchOrchestrator<P: DecisionProvider + ?Sized + 'static> {
    provider: Arc<P>,
    config: TournamentConfig,
    params: EngineParams,
    events: EventSender,
    rng: StdRng,
    scoreboard: Scoreboard,
}

impl<P: DecisionProvider + ?Sized + 'static> MatchOrchestrator<P> {
    pub fn new(
        provider: Arc<P>,
        config: TournamentConfig,
        params: EngineParams,
        events: EventSender,
    ) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            provider,
            config,
            params,
            events,
            rng,
            scoreboard: Scoreboard::new(),
        }
    }

    /// Run every match, then publish the final standings
    ///
    /// A match that aborts is reported and left unscored; the tournament
    /// moves on to the next one.
    pub async fn run(mut self) -> TournamentReport {
        let total = self.config.matches;
        info!("Starting tournament of {} match(es)", total);

        let mut matches = Vec::new();
        let mut aborted = Vec::new();
        for match_number in 1..=total {
            match self.run_match(match_number).await {
                Ok(summary) => matches.push(summary),
                Err(e) => {
                    error!("Match {} aborted: {}", match_number, e);
                    self.events.publish(GameEvent::MatchAborted {
                        match_number,
                        reason: e.to_string(),
                    });
                    aborted.push(match_number);
                }
            }
        }

        let standings = self.scoreboard.standings();
        let champion = self.scoreboard.champion();
        self.events.publish(GameEvent::TournamentFinished {
            standings: standings.clone(),
            champion,
        });
        info!("Tournament finished, champion: seat {}", champion);

        TournamentReport {
            matches,
            aborted,
            standings,
            champion,
        }
    }

    /// Deal roles, play one match to the end, then run the awards
    pub async fn run_match(&mut self, match_number: u32) -> Result<MatchSummary, MatchError> {
        let assignment = self.config.composition.assign(&mut self.rng);
        self.start_match(match_number, &assignment).await;

        let report = PhaseEngine::new(
            self.provider.as_ref(),
            &mut self.events,
            &mut self.rng,
            &self.params,
            assignment,
        )
        .run()
        .await?;

        let (mvp, lvp) = self.awards(&report).await;
        self.scoreboard
            .apply_match(&report.assignment, report.winner, mvp, lvp);
        self.events.publish(GameEvent::AwardResult {
            mvp,
            lvp,
            standings: self.scoreboard.standings(),
        });

        Ok(MatchSummary {
            match_number,
            winner: report.winner,
            days: report.days,
            mvp,
            lvp,
        })
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    async fn start_match(&mut self, match_number: u32, assignment: &RoleAssignment) {
        info!("Match {} of {}", match_number, self.config.matches);
        let seats = assignment
            .iter()
            .map(|(seat, role)| SeatInfo {
                seat,
                name: self.config.seat_name(seat).to_string(),
                role,
            })
            .collect();
        self.events.publish(GameEvent::MatchStarted {
            match_number,
            total_matches: self.config.matches,
            seats,
        });

        for (seat, role) in assignment.iter() {
            let briefing = SeatBriefing {
                seat,
                role,
                wolf_teammates: assignment.wolf_teammates(seat),
                composition: self.config.composition.clone(),
            };
            self.provider.begin_match(&briefing).await;
        }
    }

    /// Reveal the match to every seat and collect MVP/LVP ballots
    ///
    /// Malformed ballots are dropped. Ties are broken at random, the same
    /// way as the wolf vote.
    async fn awards(&mut self, report: &MatchReport) -> (Option<SeatId>, Option<SeatId>) {
        let reveal =
            PromptTemplate::match_over(report.winner, &report.assignment, &report.log.render());

        let kind = DecisionKind::AwardBallot;
        let mut ballots = Vec::new();
        for seat in SeatId::all() {
            self.provider.tell(seat, &reveal).await;
            match ask_parsed(
                self.provider.as_ref(),
                seat,
                kind,
                self.params.decision_timeout,
                parse_award_ballot,
            )
            .await
            {
                Ok(pick) => ballots.push(AwardBallot {
                    voter: seat,
                    mvp: pick.mvp,
                    lvp: pick.lvp,
                }),
                Err(e) => {
                    warn!("Seat {} award ballot ignored: {}", seat, e);
                    self.events.publish(GameEvent::NoAction {
                        seat,
                        decision: kind,
                    });
                }
            }
        }

        let mvp_votes: Vec<Ballot> = ballots
            .iter()
            .map(|b| Ballot::new(b.voter, Some(b.mvp)))
            .collect();
        let lvp_votes: Vec<Ballot> = ballots
            .iter()
            .map(|b| Ballot::new(b.voter, Some(b.lvp)))
            .collect();
        self.events.publish(GameEvent::AwardTally { ballots });

        let mvp = tally(&mvp_votes).pick_random(&mut self.rng);
        let lvp = tally(&lvp_votes).pick_random(&mut self.rng);
        (mvp, lvp)
    }
}
