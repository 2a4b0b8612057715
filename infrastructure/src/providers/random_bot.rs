//! Seeded random bot
//!
//! Answers every decision with a plausible random choice. It ignores the
//! narrative and only knows what its briefing told it, so wolves never
//! target each other and nobody targets themselves.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Mutex;
use werewolf_application::{DecisionError, DecisionProvider};
use werewolf_domain::{DecisionKind, DecisionRequest, SeatBriefing, SeatId};

const DISCUSSION_LINES: [&str; 5] = [
    "I have been watching seat {}. Something is off.",
    "Seat {} was far too quiet yesterday.",
    "I trust seat {} for now, but I am keeping an eye on everyone.",
    "My vote is leaning toward seat {}.",
    "Seat {} should explain themselves.",
];

const LAST_WORDS: [&str; 3] = [
    "Look closely at seat {}.",
    "I was on your side. Do not let seat {} off the hook.",
    "Good luck. Seat {} knows more than they say.",
];

pub struct RandomBotProvider {
    rng: Mutex<StdRng>,
    briefings: Mutex<HashMap<SeatId, SeatBriefing>>,
}

impl RandomBotProvider {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            briefings: Mutex::new(HashMap::new()),
        }
    }

    /// Seats this bot is willing to name
    fn candidates(&self, seat: SeatId) -> Vec<SeatId> {
        let teammates = self
            .briefings
            .lock()
            .ok()
            .and_then(|b| b.get(&seat).map(|b| b.wolf_teammates.clone()))
            .unwrap_or_default();
        SeatId::all()
            .filter(|s| *s != seat && !teammates.contains(s))
            .collect()
    }

    fn answer(&self, seat: SeatId, kind: DecisionKind) -> Result<String, DecisionError> {
        let candidates = self.candidates(seat);
        let mut guard = self
            .rng
            .lock()
            .map_err(|_| DecisionError::Unavailable("random bot state poisoned".to_string()))?;
        let rng: &mut StdRng = &mut guard;

        let text = match kind {
            DecisionKind::SeerCheck | DecisionKind::WolfVote | DecisionKind::HunterShot => {
                pick(&candidates, seat, rng)
            }
            DecisionKind::WolfDiscussion => {
                format!("Let's take seat {} tonight.", pick(&candidates, seat, rng))
            }
            DecisionKind::WitchAntidote { .. } => {
                if rng.random_bool(0.5) { "save" } else { "no" }.to_string()
            }
            DecisionKind::WitchPoison => {
                if rng.random_bool(0.2) {
                    pick(&candidates, seat, rng)
                } else {
                    "no".to_string()
                }
            }
            DecisionKind::Discussion => {
                let line = DISCUSSION_LINES[rng.random_range(0..DISCUSSION_LINES.len())];
                line.replace("{}", &pick(&candidates, seat, rng))
            }
            DecisionKind::LastWords => {
                let line = LAST_WORDS[rng.random_range(0..LAST_WORDS.len())];
                line.replace("{}", &pick(&candidates, seat, rng))
            }
            DecisionKind::DayVote => {
                if rng.random_bool(0.15) {
                    "abstain".to_string()
                } else {
                    pick(&candidates, seat, rng)
                }
            }
            DecisionKind::AwardBallot => {
                let mvp = SeatId::all().choose(&mut *rng).unwrap_or(seat);
                let others: Vec<SeatId> = SeatId::all().filter(|s| *s != mvp).collect();
                format!("{}-{}", mvp, pick(&others, seat, rng))
            }
        };
        Ok(text)
    }
}

fn pick(candidates: &[SeatId], fallback: SeatId, rng: &mut StdRng) -> String {
    candidates
        .iter()
        .choose(rng)
        .copied()
        .unwrap_or(fallback)
        .to_string()
}

#[async_trait]
impl DecisionProvider for RandomBotProvider {
    async fn begin_match(&self, briefing: &SeatBriefing) {
        if let Ok(mut briefings) = self.briefings.lock() {
            briefings.insert(briefing.seat, briefing.clone());
        }
    }

    async fn tell(&self, _seat: SeatId, _message: &str) {}

    async fn ask(&self, seat: SeatId, request: &DecisionRequest) -> Result<String, DecisionError> {
        self.answer(seat, request.kind)
    }
}
