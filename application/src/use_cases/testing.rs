//! Scripted decision provider for use case tests

use crate::ports::decision_provider::{DecisionError, DecisionProvider};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use werewolf_domain::{DecisionKind, DecisionRequest, PromptTemplate, SeatBriefing, SeatId};

/// Answers from per-seat queues, then per-kind defaults, then a built-in
/// fallback that never kills anyone
pub(crate) struct ScriptedProvider {
    scripted: Mutex<HashMap<(SeatId, &'static str), VecDeque<String>>>,
    defaults: HashMap<&'static str, String>,
    slow: HashSet<(SeatId, &'static str)>,
    failing: HashSet<(SeatId, &'static str)>,
    vote_out_wolves: bool,
    wolves: Mutex<BTreeSet<SeatId>>,
    executed: Mutex<BTreeSet<SeatId>>,
    asked: Mutex<Vec<(SeatId, DecisionKind)>>,
    told: Mutex<Vec<(SeatId, String)>>,
    briefed: Mutex<Vec<SeatBriefing>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self {
            scripted: Mutex::new(HashMap::new()),
            defaults: HashMap::new(),
            slow: HashSet::new(),
            failing: HashSet::new(),
            vote_out_wolves: false,
            wolves: Mutex::new(BTreeSet::new()),
            executed: Mutex::new(BTreeSet::new()),
            asked: Mutex::new(Vec::new()),
            told: Mutex::new(Vec::new()),
            briefed: Mutex::new(Vec::new()),
        }
    }

    /// Queue answers for one seat and decision kind
    pub(crate) fn script(self, seat: u8, kind: &'static str, answers: &[&str]) -> Self {
        let seat = SeatId::new(seat).unwrap();
        self.scripted
            .lock()
            .unwrap()
            .entry((seat, kind))
            .or_default()
            .extend(answers.iter().map(|a| a.to_string()));
        self
    }

    pub(crate) fn with_default(mut self, kind: &'static str, answer: &str) -> Self {
        self.defaults.insert(kind, answer.to_string());
        self
    }

    /// This seat never answers this kind in time
    pub(crate) fn slow(mut self, seat: u8, kind: &'static str) -> Self {
        self.slow.insert((SeatId::new(seat).unwrap(), kind));
        self
    }

    /// This seat's provider errors on this kind
    pub(crate) fn failing(mut self, seat: u8, kind: &'static str) -> Self {
        self.failing.insert((SeatId::new(seat).unwrap(), kind));
        self
    }

    /// Day votes go to the lowest wolf not yet executed
    pub(crate) fn vote_out_wolves(mut self) -> Self {
        self.vote_out_wolves = true;
        self
    }

    pub(crate) fn asked(&self) -> Vec<(SeatId, DecisionKind)> {
        self.asked.lock().unwrap().clone()
    }

    pub(crate) fn told(&self, seat: SeatId) -> Vec<String> {
        self.told
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == seat)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub(crate) fn briefed(&self) -> Vec<SeatBriefing> {
        self.briefed.lock().unwrap().clone()
    }

    fn answer(&self, seat: SeatId, kind: DecisionKind) -> String {
        let key = (seat, kind.as_str());
        if let Some(answer) = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
        {
            return answer;
        }
        if kind == DecisionKind::DayVote && self.vote_out_wolves {
            let executed = self.executed.lock().unwrap();
            if let Some(wolf) = self
                .wolves
                .lock()
                .unwrap()
                .iter()
                .find(|w| !executed.contains(*w))
            {
                return wolf.to_string();
            }
        }
        if let Some(answer) = self.defaults.get(kind.as_str()) {
            return answer.clone();
        }
        match kind {
            DecisionKind::WolfDiscussion | DecisionKind::Discussion | DecisionKind::LastWords => {
                format!("Seat {seat} has nothing to add.")
            }
            DecisionKind::WitchAntidote { .. } | DecisionKind::WitchPoison => "no".to_string(),
            DecisionKind::DayVote => "abstain".to_string(),
            DecisionKind::AwardBallot => "1-2".to_string(),
            DecisionKind::SeerCheck | DecisionKind::WolfVote | DecisionKind::HunterShot => {
                String::new()
            }
        }
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn begin_match(&self, briefing: &SeatBriefing) {
        if briefing.role.is_wolf() {
            self.wolves.lock().unwrap().insert(briefing.seat);
        }
        self.briefed.lock().unwrap().push(briefing.clone());
    }

    async fn tell(&self, seat: SeatId, message: &str) {
        let wolves: Vec<SeatId> = self.wolves.lock().unwrap().iter().copied().collect();
        for wolf in wolves {
            if message == PromptTemplate::execution(Some(wolf)) {
                self.executed.lock().unwrap().insert(wolf);
            }
        }
        self.told.lock().unwrap().push((seat, message.to_string()));
    }

    async fn ask(&self, seat: SeatId, request: &DecisionRequest) -> Result<String, DecisionError> {
        self.asked.lock().unwrap().push((seat, request.kind));
        let key = (seat, request.kind.as_str());
        if self.failing.contains(&key) {
            return Err(DecisionError::Transport("connection reset".to_string()));
        }
        if self.slow.contains(&key) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(self.answer(seat, request.kind))
    }
}
