use std::sync::Arc;

use tracing::{debug, info};

use crate::asr::{AsrBackend, AsrRequest, TranscriptionError, TranscriptionResult};
use crate::pipeline::{NormalizedAudio, normalize};

/// Normalizes uploaded audio and hands it to the configured recognizer.
///
/// The recognition locale is fixed at construction; it does not follow the detected
/// language of the speaker.
pub struct TranscriptionService {
    backend: Arc<dyn AsrBackend>,
    language: String,
}

impl TranscriptionService {
    pub fn new(backend: Arc<dyn AsrBackend>, language: impl Into<String>) -> Self {
        let language = language.into();
        info!(backend = %backend.name(), %language, "Transcription service created");
        Self { backend, language }
    }

    /// Decodes container bytes to mono 16kHz on a blocking thread. An empty waveform is
    /// `Inaudible`.
    pub async fn normalize(&self, audio_bytes: &[u8]) -> Result<NormalizedAudio, TranscriptionError> {
        let owned = audio_bytes.to_vec();
        let audio = tokio::task::spawn_blocking(move || normalize(&owned))
            .await
            .map_err(|e| TranscriptionError::Processing(e.to_string()))??;

        if audio.is_empty() {
            return Err(TranscriptionError::Inaudible);
        }
        Ok(audio)
    }

    /// One recognizer attempt, no retry.
    pub async fn recognize(
        &self,
        audio: NormalizedAudio,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        debug!(
            duration_secs = audio.duration_secs(),
            backend = %self.backend.name(),
            "Sending normalized audio to recognizer"
        );

        let result = self
            .backend
            .transcribe(AsrRequest {
                audio,
                language: self.language.clone(),
            })
            .await?;

        debug!(
            chars = result.text.len(),
            language = ?result.language,
            confidence = ?result.confidence,
            "Recognizer returned transcript"
        );
        Ok(result)
    }

    /// Normalizes then recognizes raw container bytes.
    pub async fn transcribe(&self, audio_bytes: &[u8]) -> Result<TranscriptionResult, TranscriptionError> {
        let audio = self.normalize(audio_bytes).await?;
        self.recognize(audio).await
    }
}
