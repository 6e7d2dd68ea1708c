use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Conventional variable holding the completion backend credential.
pub const COMPLETION_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub completion: CompletionSettings,
    pub transcription: TranscriptionSettings,
    pub synthesis: SynthesisSettings,
    pub health: HealthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptionSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// BCP-47 locale sent to the recognizer, independent of the detected input language.
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SynthesisSettings {
    pub endpoint: String,
    /// Language used when detection fails or yields an unsupported voice.
    pub default_language: String,
    pub max_chunk_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HealthSettings {
    pub max_memory_percent: f32,
    pub max_cpu_percent: f32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("PAROLE"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("completion.base_url", "https://api.groq.com/openai/v1")?
            .set_default("completion.model", "llama-3.1-8b-instant")?
            .set_default("completion.temperature", 0.3)?
            .set_default("completion.top_p", 0.9)?
            .set_default("completion.max_tokens", 400)?
            .set_default("transcription.endpoint", "https://speech.googleapis.com")?
            .set_default("transcription.language", "fr-FR")?
            .set_default("synthesis.endpoint", "https://translate.google.com")?
            .set_default("synthesis.default_language", "fr")?
            .set_default("synthesis.max_chunk_chars", 100)?
            .set_default("health.max_memory_percent", 90.0)?
            .set_default("health.max_cpu_percent", 95.0)?
            .set_override_option(
                "completion.api_key",
                std::env::var(COMPLETION_API_KEY_ENV).ok(),
            )?
            .build()?;

        config.try_deserialize()
    }

    /// Checks startup invariants. A missing completion credential is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.completion.require_api_key().map(|_| ())
    }
}

impl CompletionSettings {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::NotFound(format!(
                "completion.api_key (set {COMPLETION_API_KEY_ENV} or PAROLE__COMPLETION__API_KEY)"
            ))),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.3,
            top_p: 0.9,
            max_tokens: 400,
        }
    }
}
