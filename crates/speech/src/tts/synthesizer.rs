use std::sync::Arc;

use tracing::{debug, warn};

use super::{SpeechBackend, SynthesisError, voice_for_language};
use crate::text::{LanguageDetector, sanitize};

/// Turns assistant replies into speech: sanitize, detect language, pick a voice, synthesize.
pub struct SpeechSynthesizer {
    backend: Arc<dyn SpeechBackend>,
    detector: LanguageDetector,
}

impl SpeechSynthesizer {
    pub fn new(backend: Arc<dyn SpeechBackend>, detector: LanguageDetector) -> Self {
        Self { backend, detector }
    }

    /// Voice for `text`, falling back to the detector's default language.
    pub fn select_voice(&self, text: &str) -> String {
        let detected = self.detector.detect(text);
        match voice_for_language(&detected) {
            Some(voice) => voice.to_string(),
            None => {
                debug!(%detected, fallback = %self.detector.default_language(), "No voice for detected language");
                voice_for_language(self.detector.default_language())
                    .unwrap_or("fr")
                    .to_string()
            }
        }
    }

    /// Fallible synthesis. Text that sanitizes to nothing yields `Ok(empty)` without
    /// detection or a backend call.
    pub async fn try_synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let clean = sanitize(text);
        if clean.is_empty() {
            return Ok(Vec::new());
        }

        let voice = self.select_voice(&clean);
        self.backend.synthesize(&clean, &voice).await
    }

    /// Best-effort synthesis: any backend failure degrades to empty audio.
    pub async fn synthesize(&self, text: &str) -> Vec<u8> {
        match self.try_synthesize(text).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!(backend = %self.backend.name(), error = %e, "Speech synthesis failed, returning empty audio");
                Vec::new()
            }
        }
    }
}
