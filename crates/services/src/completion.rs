use async_trait::async_trait;
use parole_config::{CompletionSettings, ConfigError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("LLM error: {0}")]
    Failure(String),
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    /// Returns the assistant reply for a fully composed prompt. Single attempt.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    fn name(&self) -> &str;
}

/// OpenAI-compatible `/chat/completions` client (Groq by default).
///
/// Decoding parameters are fixed at construction. The inner `reqwest::Client` is shared by
/// every turn; it pools connections and needs no extra synchronization.
#[derive(Debug, Clone)]
pub struct ChatCompletionService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionService {
    /// Fails when the credential is missing; callers treat that as fatal at startup.
    pub fn from_settings(client: Client, settings: &CompletionSettings) -> Result<Self, ConfigError> {
        let api_key = settings.require_api_key()?.to_string();
        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Strips the credential from any diagnostic text we pass back to callers.
    fn redact(&self, message: String) -> String {
        message.replace(&self.api_key, "***")
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionService {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Failure(format!("LLM request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Failure(
                self.redact(format!("LLM API error {}: {}", status, body)),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Failure(format!("Failed to parse LLM response: {}", e)))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::Failure("No content in LLM response".to_string()))?;

        debug!(model = %self.model, chars = reply.len(), "Completion received");
        Ok(reply)
    }

    fn name(&self) -> &str {
        "chat_completions"
    }
}
