use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{SpeechBackend, SynthesisError};

/// Longest text the translate TTS endpoint accepts per request.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 100;

/// Synthesizer backed by the Google Translate TTS endpoint.
///
/// Long text is split into word-aligned chunks; each chunk comes back as an MP3 stream and
/// the streams are concatenated in order, which MP3 decoders play back seamlessly.
pub struct GoogleTranslateTts {
    client: Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslateTts {
    pub fn new(client: Client, endpoint: impl Into<String>, max_chunk_chars: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    fn url(&self) -> String {
        format!("{}/translate_tts", self.endpoint.trim_end_matches('/'))
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        voice: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let idx = index.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", voice),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Request(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechBackend for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        let chunks = split_chunks(text, self.max_chunk_chars);
        debug!(voice, chunks = chunks.len(), "Synthesizing speech");

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, voice, index, chunks.len()).await?);
        }
        Ok(audio)
    }

    fn name(&self) -> &str {
        "google_translate_tts"
    }
}

/// Splits text into chunks of at most `max_chars` characters on whitespace boundaries.
/// A single word longer than the limit is hard-split.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
