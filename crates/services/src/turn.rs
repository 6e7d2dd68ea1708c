use std::sync::Arc;

use parole_speech::{SpeechSynthesizer, TranscriptionError, TranscriptionService};
use thiserror::Error;
use tracing::{debug, info};

use crate::completion::{CompletionBackend, CompletionError};
use crate::prompt::build_prompt;
use crate::transport::{self, TransportError};

/// Stages a turn passes through. Audio turns add `Normalizing` and `Transcribing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Received,
    Normalizing,
    Transcribing,
    PromptBuilding,
    Completing,
    Synthesizing,
    Encoding,
    Responded,
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("Failed to encode audio: {0}")]
    Encoding(#[from] TransportError),
}

/// Caller-supplied turn metadata. `history` is read, never modified.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub user_id: String,
    pub pre_prompt: String,
    pub history: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TurnResponse {
    pub user_text: String,
    /// Transport blob of the uploaded audio; audio turns only.
    pub user_audio: Option<String>,
    pub assistant_text: String,
    /// Transport blob of the synthesized reply; an encoded empty payload when there is no
    /// speech.
    pub assistant_audio: String,
}

/// Runs text and audio turns through transcription, completion, synthesis and encoding.
///
/// Stages run strictly in sequence. Transcription and completion failures abort the turn;
/// synthesis failures only cost the audio.
pub struct TurnOrchestrator {
    transcription: TranscriptionService,
    completion: Arc<dyn CompletionBackend>,
    synthesizer: SpeechSynthesizer,
}

impl TurnOrchestrator {
    pub fn new(
        transcription: TranscriptionService,
        completion: Arc<dyn CompletionBackend>,
        synthesizer: SpeechSynthesizer,
    ) -> Self {
        Self {
            transcription,
            completion,
            synthesizer,
        }
    }

    pub async fn text_turn(
        &self,
        request: &TurnRequest,
        message: &str,
    ) -> Result<TurnResponse, TurnError> {
        stage(request, TurnStage::Received);
        self.respond(request, message.to_string(), None).await
    }

    pub async fn audio_turn(
        &self,
        request: &TurnRequest,
        audio: &[u8],
    ) -> Result<TurnResponse, TurnError> {
        stage(request, TurnStage::Received);
        stage(request, TurnStage::Normalizing);
        let normalized = self.transcription.normalize(audio).await?;

        stage(request, TurnStage::Transcribing);
        let user_text = self.transcription.recognize(normalized).await?.text;

        let user_audio = transport::encode(audio)?;
        self.respond(request, user_text, Some(user_audio)).await
    }

    /// Speech for arbitrary text, best effort.
    pub async fn speak(&self, text: &str) -> Vec<u8> {
        self.synthesizer.synthesize(text).await
    }

    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        Ok(self.transcription.transcribe(audio).await?.text)
    }

    async fn respond(
        &self,
        request: &TurnRequest,
        user_text: String,
        user_audio: Option<String>,
    ) -> Result<TurnResponse, TurnError> {
        stage(request, TurnStage::PromptBuilding);
        let prompt = build_prompt(&user_text, &request.pre_prompt, &request.history);

        stage(request, TurnStage::Completing);
        let assistant_text = self.completion.complete(&prompt).await?;

        stage(request, TurnStage::Synthesizing);
        let speech = self.synthesizer.synthesize(&assistant_text).await;

        stage(request, TurnStage::Encoding);
        let assistant_audio = transport::encode(&speech)?;

        stage(request, TurnStage::Responded);
        info!(
            user_id = %request.user_id,
            audio_in = user_audio.is_some(),
            reply_chars = assistant_text.len(),
            speech_bytes = speech.len(),
            "Turn completed"
        );

        Ok(TurnResponse {
            user_text,
            user_audio,
            assistant_text,
            assistant_audio,
        })
    }
}

fn stage(request: &TurnRequest, stage: TurnStage) {
    debug!(user_id = %request.user_id, ?stage, "Turn stage");
}
