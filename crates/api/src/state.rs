use std::sync::Arc;

use parole_config::{ConfigError, Settings};
use parole_services::{
    ChatCompletionService, CompletionBackend, HealthMonitor, ResourceProbe, SystemProbe,
    TurnOrchestrator,
};
use parole_speech::{
    AsrBackend, LanguageDetector, SpeechBackend, SpeechSynthesizer, TranscriptionService,
    asr::GoogleSpeechBackend, tts::GoogleTranslateTts,
};
use tracing::info;

/// External collaborators of a turn. Swapped for doubles in tests.
pub struct Backends {
    pub asr: Arc<dyn AsrBackend>,
    pub completion: Arc<dyn CompletionBackend>,
    pub speech: Arc<dyn SpeechBackend>,
    pub probe: Arc<dyn ResourceProbe>,
}

impl Backends {
    /// Network backends sharing one connection pool. Fails without a completion credential.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let client = reqwest::Client::new();

        let completion = ChatCompletionService::from_settings(client.clone(), &settings.completion)?;
        info!(model = %completion.model(), "Completion backend ready");

        let asr = GoogleSpeechBackend::new(
            client.clone(),
            settings.transcription.endpoint.clone(),
            settings.transcription.api_key.clone(),
        );
        let speech = GoogleTranslateTts::new(
            client,
            settings.synthesis.endpoint.clone(),
            settings.synthesis.max_chunk_chars,
        );

        Ok(Self {
            asr: Arc::new(asr),
            completion: Arc::new(completion),
            speech: Arc::new(speech),
            probe: Arc::new(SystemProbe::new()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub turns: Arc<TurnOrchestrator>,
    pub health: HealthMonitor,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let backends = Backends::from_settings(&settings)?;
        Ok(Self::with_backends(settings, backends))
    }

    pub fn with_backends(settings: Settings, backends: Backends) -> Self {
        let transcription =
            TranscriptionService::new(backends.asr, settings.transcription.language.clone());
        let synthesizer = SpeechSynthesizer::new(
            backends.speech,
            LanguageDetector::new(settings.synthesis.default_language.clone()),
        );
        let turns = Arc::new(TurnOrchestrator::new(
            transcription,
            backends.completion,
            synthesizer,
        ));
        let health = HealthMonitor::new(backends.probe, &settings.health);

        Self {
            settings,
            turns,
            health,
        }
    }
}
