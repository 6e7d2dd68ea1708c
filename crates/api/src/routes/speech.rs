use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::debug;

use crate::{error::ApiError, extractors::AudioUpload, state::AppState};

#[derive(Debug, Serialize)]
pub struct SttResponse {
    pub texte: String,
}

/// Speaks the request body. Accepts a JSON string literal or plain text; replies with raw
/// `audio/mpeg`, empty when there is nothing to say or synthesis failed.
pub async fn tts(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let text = message_text(body);
    let audio = state.turns.speak(&text).await;
    debug!(chars = text.len(), bytes = audio.len(), "Synthesized speech");

    ([(header::CONTENT_TYPE, "audio/mpeg")], audio)
}

pub async fn stt(
    State(state): State<AppState>,
    upload: AudioUpload,
) -> Result<Json<SttResponse>, ApiError> {
    let texte = state.turns.transcribe(&upload.audio).await?;
    Ok(Json(SttResponse { texte }))
}

fn message_text(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(text) => text,
        Err(_) => body,
    }
}
