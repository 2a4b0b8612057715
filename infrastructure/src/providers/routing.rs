use super::error::{ProviderError, Result};
use super::{OpenAiChatProvider, RandomBotProvider};
use crate::config::{FileConfig, SeatProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use werewolf_application::{DecisionError, DecisionProvider};
use werewolf_domain::{DecisionRequest, SEAT_COUNT, SeatBriefing, SeatId};

/// Dispatches every seat to the provider configured for it
pub struct SeatRouter {
    seats: Vec<Arc<dyn DecisionProvider>>,
}

impl SeatRouter {
    /// One provider per seat, in seat order
    pub fn new(seats: Vec<Arc<dyn DecisionProvider>>) -> Result<Self> {
        if seats.len() != SEAT_COUNT {
            return Err(ProviderError::SeatCount(seats.len()));
        }
        Ok(Self { seats })
    }

    /// The same provider behind every seat
    pub fn uniform(provider: Arc<dyn DecisionProvider>) -> Self {
        Self {
            seats: vec![provider; SEAT_COUNT],
        }
    }

    /// Build providers from the `[[seats]]` table
    ///
    /// Bot seats share one seeded bot so a fixed seed reproduces the whole
    /// table. Each OpenAI seat gets its own client.
    pub fn from_config(config: &FileConfig) -> Result<Self> {
        let bot: Arc<dyn DecisionProvider> = Arc::new(RandomBotProvider::new(config.engine.seed));
        let mut seats = Vec::with_capacity(SEAT_COUNT);

        for (seat, entry) in config.resolved_seats() {
            let provider: Arc<dyn DecisionProvider> = match entry.provider {
                SeatProviderKind::Bot => Arc::clone(&bot),
                SeatProviderKind::OpenAi => {
                    let (Some(model), Some(base_url)) = (&entry.model, &entry.base_url) else {
                        return Err(ProviderError::SeatConfig {
                            seat,
                            reason: "openai seats need both model and base_url".to_string(),
                        });
                    };
                    info!(seat = %seat, model = %model, "Seat uses chat completions");
                    Arc::new(
                        OpenAiChatProvider::new(base_url, model.as_str())
                            .with_api_key_env(&entry.api_key_env)
                            .with_temperature(entry.temperature),
                    )
                }
            };
            seats.push(provider);
        }

        Self::new(seats)
    }

    fn provider(&self, seat: SeatId) -> &dyn DecisionProvider {
        self.seats[seat.index()].as_ref()
    }
}

#[async_trait]
impl DecisionProvider for SeatRouter {
    async fn begin_match(&self, briefing: &SeatBriefing) {
        self.provider(briefing.seat).begin_match(briefing).await
    }

    async fn tell(&self, seat: SeatId, message: &str) {
        self.provider(seat).tell(seat, message).await
    }

    async fn ask(
        &self,
        seat: SeatId,
        request: &DecisionRequest,
    ) -> std::result::Result<String, DecisionError> {
        self.provider(seat).ask(seat, request).await
    }
}
