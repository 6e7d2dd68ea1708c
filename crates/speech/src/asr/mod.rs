pub mod google;

pub use google::GoogleSpeechBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::{AudioError, NormalizedAudio};

/// Request to transcribe a complete utterance.
pub struct AsrRequest {
    /// Mono 16kHz waveform.
    pub audio: NormalizedAudio,
    /// BCP-47 recognition locale (e.g. "fr-FR").
    pub language: String,
}

/// Result of an ASR transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The backend processed the audio but found no recognizable speech.
    #[error("Could not understand the audio")]
    Inaudible,
    #[error("Recognition backend error: {0}")]
    BackendUnavailable(String),
    #[error("Audio processing error: {0}")]
    Processing(String),
    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),
}

impl From<AudioError> for TranscriptionError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::UnsupportedFormat(msg) => TranscriptionError::UnsupportedAudioFormat(msg),
            other => TranscriptionError::Processing(other.to_string()),
        }
    }
}

/// Trait for pluggable ASR backends.
#[async_trait]
pub trait AsrBackend: Send + Sync + 'static {
    /// Transcribes a complete utterance. Exactly one attempt per call.
    async fn transcribe(&self, request: AsrRequest)
    -> Result<TranscriptionResult, TranscriptionError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
