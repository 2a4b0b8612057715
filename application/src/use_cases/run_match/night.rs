//! Night phases: seer, wolves, witch

use super::{MatchError, PhaseEngine};
use crate::ports::decision_provider::DecisionProvider;
use crate::use_cases::resolve_action::RoleActionResolver;
use werewolf_domain::decision::{parse_consent, parse_poison, parse_target};
use werewolf_domain::{
    Ballot, Consent, DecisionKind, GameEvent, Phase, PoisonChoice, PromptTemplate, Role, SpeechKind,
    VoteKind, WitchAction,
};

impl<P: DecisionProvider + ?Sized> PhaseEngine<'_, P> {
    /// Run every night sub-phase whose actor is alive
    pub(super) async fn night(&mut self) -> Result<(), MatchError> {
        self.tell_all(&PromptTemplate::night_falls(self.state.day()))
            .await;

        self.seer_check().await?;
        self.wolf_discussion().await;
        self.wolf_vote().await?;

        // Antidote and poison are never both used on the same night
        if !self.witch_antidote().await? {
            self.witch_poison().await?;
        }
        Ok(())
    }

    async fn seer_check(&mut self) -> Result<(), MatchError> {
        let Some(seer) = self.living_one(Role::Seer) else {
            return Ok(());
        };
        self.enter_phase(Phase::NightSeer).await;

        let kind = DecisionKind::SeerCheck;
        let Ok(target) = self.ask(seer, kind, parse_target).await else {
            self.no_action(seer, kind);
            return Ok(());
        };
        match RoleActionResolver::seer_check(&self.state, seer, target) {
            Ok(faction) => {
                self.provider
                    .tell(seer, &PromptTemplate::seer_result(target, faction))
                    .await;
                self.emit(GameEvent::Reveal {
                    seer,
                    target,
                    faction,
                });
                Ok(())
            }
            Err(e) => self.recover(seer, kind, e),
        }
    }

    /// Living wolves speak in ascending seat order; each hears the others
    async fn wolf_discussion(&mut self) {
        let wolves = self.state.living_with_role(Role::Wolf);
        if wolves.is_empty() {
            return;
        }
        self.enter_phase(Phase::NightWolfDiscuss).await;

        let mut statements = Vec::with_capacity(wolves.len());
        for &wolf in &wolves {
            if let Some(text) = self.ask_speech(wolf, DecisionKind::WolfDiscussion).await {
                self.emit(GameEvent::Speech {
                    seat: wolf,
                    speech: SpeechKind::WolfDiscussion,
                    text: text.clone(),
                });
                statements.push((wolf, text));
            }
        }

        for &wolf in &wolves {
            for (speaker, text) in statements.iter().filter(|(s, _)| *s != wolf) {
                self.provider
                    .tell(wolf, &PromptTemplate::wolf_statement(*speaker, text))
                    .await;
            }
        }
    }

    async fn wolf_vote(&mut self) -> Result<(), MatchError> {
        let wolves = self.state.living_with_role(Role::Wolf);
        if wolves.is_empty() {
            return Ok(());
        }
        self.enter_phase(Phase::NightWolfVote).await;

        let kind = DecisionKind::WolfVote;
        let mut ballots = Vec::with_capacity(wolves.len());
        for &wolf in &wolves {
            let target = match self.ask(wolf, kind, parse_target).await {
                Ok(target) => self.checked_vote(wolf, kind, target)?,
                Err(_) => {
                    self.no_action(wolf, kind);
                    None
                }
            };
            ballots.push(Ballot::new(wolf, target));
        }

        let (result, outcome) =
            RoleActionResolver::resolve_wolf_vote(&mut self.state, &ballots, &mut *self.rng);
        self.emit_tally(VoteKind::WolfKill, ballots, &result, outcome);
        self.tell_seats(&wolves, &PromptTemplate::wolf_target(outcome.target()))
            .await;
        Ok(())
    }

    /// Returns whether the antidote was used tonight
    async fn witch_antidote(&mut self) -> Result<bool, MatchError> {
        let Some(witch) = self.living_one(Role::Witch) else {
            return Ok(false);
        };
        let Some(victim) = self.state.pending().wolf_kill else {
            return Ok(false);
        };
        if !self.state.player(witch).has_antidote() {
            return Ok(false);
        }
        self.enter_phase(Phase::NightWitchAntidote).await;

        let kind = DecisionKind::WitchAntidote { victim };
        match self.ask(witch, kind, parse_consent).await {
            Ok(Consent::Accept) => {
                let target = RoleActionResolver::apply_antidote(&mut self.state, witch)?;
                self.emit(GameEvent::WitchDecision {
                    witch,
                    decision: WitchAction::Saved { target },
                });
                Ok(true)
            }
            Ok(Consent::Decline) => {
                self.emit(GameEvent::WitchDecision {
                    witch,
                    decision: WitchAction::LetDie { target: victim },
                });
                Ok(false)
            }
            Err(_) => {
                self.no_action(witch, kind);
                Ok(false)
            }
        }
    }

    async fn witch_poison(&mut self) -> Result<(), MatchError> {
        let Some(witch) = self.living_one(Role::Witch) else {
            return Ok(());
        };
        if !self.state.player(witch).has_poison() {
            return Ok(());
        }
        self.enter_phase(Phase::NightWitchPoison).await;

        let kind = DecisionKind::WitchPoison;
        match self.ask(witch, kind, parse_poison).await {
            Ok(PoisonChoice::Target(target)) => {
                match RoleActionResolver::apply_poison(&mut self.state, witch, target) {
                    Ok(()) => {
                        self.emit(GameEvent::WitchDecision {
                            witch,
                            decision: WitchAction::Poisoned { target },
                        });
                        Ok(())
                    }
                    Err(e) => self.recover(witch, kind, e),
                }
            }
            Ok(PoisonChoice::Decline) => {
                self.emit(GameEvent::WitchDecision {
                    witch,
                    decision: WitchAction::HeldPoison,
                });
                Ok(())
            }
            Err(_) => {
                self.no_action(witch, kind);
                Ok(())
            }
        }
    }
}
