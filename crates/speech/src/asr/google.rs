use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AsrBackend, AsrRequest, TranscriptionError, TranscriptionResult};

/// Remote recognizer speaking the Google Speech-to-Text v1 REST API
/// (`POST /v1/speech:recognize`).
pub struct GoogleSpeechBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    audio_channel_count: u16,
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    #[serde(default)]
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl GoogleSpeechBackend {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/speech:recognize", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl AsrBackend for GoogleSpeechBackend {
    async fn transcribe(
        &self,
        request: AsrRequest,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let wav = request.audio.to_wav()?;

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: request.audio.sample_rate(),
                audio_channel_count: request.audio.channels(),
                language_code: request.language.clone(),
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(&wav),
            },
        };

        let mut req = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key.as_str())]);
        }

        // without_url(): the query string carries the API key
        let response = req
            .send()
            .await
            .map_err(|e| TranscriptionError::BackendUnavailable(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::BackendUnavailable(format!(
                "recognizer returned {}: {}",
                status, body
            )));
        }

        let parsed: RecognizeResponse = response.json().await.map_err(|e| {
            TranscriptionError::BackendUnavailable(format!(
                "Failed to parse recognizer response: {}",
                e.without_url()
            ))
        })?;

        let best: Vec<&Alternative> = parsed
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .filter(|a| !a.transcript.trim().is_empty())
            .collect();

        if best.is_empty() {
            return Err(TranscriptionError::Inaudible);
        }

        let text = best
            .iter()
            .map(|a| a.transcript.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence = best.iter().filter_map(|a| a.confidence).reduce(f64::min);
        let language = parsed
            .results
            .iter()
            .find_map(|r| r.language_code.clone())
            .or(Some(request.language));

        Ok(TranscriptionResult {
            text,
            language,
            confidence,
        })
    }

    fn name(&self) -> &str {
        "google_speech"
    }
}
