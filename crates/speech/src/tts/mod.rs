pub mod google_translate;
pub mod synthesizer;

pub use google_translate::GoogleTranslateTts;
pub use synthesizer::SpeechSynthesizer;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("HTTP request failed: {0}")]
    Request(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Trait for pluggable speech synthesis backends.
#[async_trait]
pub trait SpeechBackend: Send + Sync + 'static {
    /// Renders already-sanitized `text` with `voice` into compressed (MP3) audio.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError>;

    fn name(&self) -> &str;
}

/// Maps a detected language code onto a synthesis voice. `None` means unsupported.
pub fn voice_for_language(code: &str) -> Option<&'static str> {
    match code {
        "fr" => Some("fr"),
        "en" => Some("en"),
        "es" => Some("es"),
        "de" => Some("de"),
        "it" => Some("it"),
        "pt" => Some("pt"),
        "ru" => Some("ru"),
        "ja" => Some("ja"),
        "zh-cn" => Some("zh"),
        "zh-tw" => Some("zh-tw"),
        _ => None,
    }
}
