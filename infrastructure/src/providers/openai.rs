//! OpenAI-compatible chat provider
//!
//! Keeps one conversation per seat locally, since the chat completions API
//! is stateless and needs the full history on every call.

use super::error::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use werewolf_application::{DecisionError, DecisionProvider};
use werewolf_domain::{DecisionRequest, PromptTemplate, SeatBriefing, SeatId};

pub const DEFAULT_TEMPERATURE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessage {
    role: ChatRole,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

fn chat_endpoint(base_url: &str) -> String {
    if base_url.contains("/chat/completions") {
        base_url.to_string()
    } else {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

/// Chat completions client serving one or more seats
pub struct OpenAiChatProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    histories: Mutex<HashMap<SeatId, Vec<ChatMessage>>>,
}

impl OpenAiChatProvider {
    pub fn new(base_url: &str, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: chat_endpoint(base_url),
            model: model.into(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            histories: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Read the API key from an environment variable, if set
    pub fn with_api_key_env(self, var: &str) -> Self {
        let key = std::env::var(var).ok();
        if key.is_none() {
            debug!(var, "API key variable not set, sending unauthenticated requests");
        }
        self.with_api_key(key)
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature.unwrap_or(DEFAULT_TEMPERATURE);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of messages held for a seat, system prompt included
    pub async fn history_len(&self, seat: SeatId) -> usize {
        self.histories
            .lock()
            .await
            .get(&seat)
            .map_or(0, Vec::len)
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };

        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            messages = messages.len(),
            "Calling chat completions"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<ChatCompletionResponse>().await?.into_text()
    }
}

#[async_trait]
impl DecisionProvider for OpenAiChatProvider {
    async fn begin_match(&self, briefing: &SeatBriefing) {
        let system = ChatMessage::system(PromptTemplate::system_prompt(briefing));
        self.histories
            .lock()
            .await
            .insert(briefing.seat, vec![system]);
    }

    async fn tell(&self, seat: SeatId, message: &str) {
        self.histories
            .lock()
            .await
            .entry(seat)
            .or_default()
            .push(ChatMessage::user(message));
    }

    async fn ask(
        &self,
        seat: SeatId,
        request: &DecisionRequest,
    ) -> std::result::Result<String, DecisionError> {
        let prompt = ChatMessage::user(request.prompt.as_str());
        let mut messages = self
            .histories
            .lock()
            .await
            .get(&seat)
            .cloned()
            .unwrap_or_default();
        messages.push(prompt.clone());

        // Append only after the call completes; a cancelled ask leaves no trace.
        let reply = self.complete(&messages).await.map_err(|e| {
            warn!(seat = %seat, kind = %request.kind, "Chat completion failed: {}", e);
            DecisionError::from(e)
        })?;

        let mut histories = self.histories.lock().await;
        let history = histories.entry(seat).or_default();
        history.push(prompt);
        history.push(ChatMessage::assistant(reply.as_str()));
        Ok(reply)
    }
}
