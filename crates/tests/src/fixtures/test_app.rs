use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use parole_api::{
    build_router,
    state::{AppState, Backends},
};
use parole_config::{
    AppSettings, CompletionSettings, HealthSettings, Settings, SynthesisSettings,
    TranscriptionSettings,
};
use parole_services::{ResourceUsage, StaticProbe};
use tokio::net::TcpListener;

use super::fakes::{FakeAsr, FakeCompletion, FakeSpeech};

pub const ASSISTANT_REPLY: &str = "Bonjour ! Je suis ravi de vous aider aujourd'hui, que puis-je faire pour vous ?";
pub const HEARD_TEXT: &str = "quelle est la capitale de la France";

/// Knobs for the doubles behind a test server.
pub struct TestBackends {
    pub completion: FakeCompletion,
    pub speech_fails: bool,
    pub usage: ResourceUsage,
}

impl Default for TestBackends {
    fn default() -> Self {
        Self {
            completion: FakeCompletion::replying(ASSISTANT_REPLY),
            speech_fails: false,
            usage: ResourceUsage {
                memory_percent: 42.0,
                cpu_percent: 12.5,
            },
        }
    }
}

/// A running test application backed by in-process doubles.
pub struct TestApp {
    pub addr: SocketAddr,
    pub base_url: String,
    pub settings: Settings,
    pub client: reqwest::Client,
    pub completion: Arc<FakeCompletion>,
    pub speech: Arc<FakeSpeech>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(TestBackends::default()).await
    }

    pub async fn spawn_with(backends: TestBackends) -> Self {
        let settings = test_settings();

        let completion = Arc::new(backends.completion);
        let speech = Arc::new(FakeSpeech {
            fail: backends.speech_fails,
            calls: Mutex::new(Vec::new()),
        });

        let app_state = AppState::with_backends(
            settings.clone(),
            Backends {
                asr: Arc::new(FakeAsr {
                    transcript: HEARD_TEXT.to_string(),
                }),
                completion: completion.clone(),
                speech: speech.clone(),
                probe: Arc::new(StaticProbe(backends.usage)),
            },
        );
        let app = build_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            base_url: format!("http://{}", addr),
            settings,
            client: reqwest::Client::new(),
            completion,
            speech,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Settings that never reach the network; backends are doubles.
pub fn test_settings() -> Settings {
    Settings {
        app: AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: Vec::new(),
        },
        completion: CompletionSettings {
            api_key: Some("gsk_test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        },
        transcription: TranscriptionSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: None,
            language: "fr-FR".to_string(),
        },
        synthesis: SynthesisSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            default_language: "fr".to_string(),
            max_chunk_chars: 100,
        },
        health: HealthSettings {
            max_memory_percent: 90.0,
            max_cpu_percent: 95.0,
        },
    }
}
