use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use parole_services::{TurnRequest, TurnResponse};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::AudioUpload, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ChatTextRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub pre_prompt: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatTextResponse {
    pub texte_utilisateur: String,
    pub reponse_assistant: String,
    pub tts_audio_base64: String,
}

#[derive(Debug, Serialize)]
pub struct ChatAudioResponse {
    pub texte_utilisateur: String,
    pub audio_utilisateur_base64: String,
    pub reponse_assistant: String,
    pub tts_audio_base64: String,
}

pub async fn chat_text(
    State(state): State<AppState>,
    payload: Result<Json<ChatTextRequest>, JsonRejection>,
) -> Result<Json<ChatTextResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if body.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing 'message' field".to_string()));
    }

    let request = TurnRequest {
        user_id: body.user_id,
        pre_prompt: body.pre_prompt,
        history: body.history,
    };
    let turn = state.turns.text_turn(&request, &body.message).await?;

    Ok(Json(ChatTextResponse {
        texte_utilisateur: turn.user_text,
        reponse_assistant: turn.assistant_text,
        tts_audio_base64: turn.assistant_audio,
    }))
}

/// Audio turn. Fields: `file` (binary), `user_id`, `pre_prompt`, `history` (text).
pub async fn chat_audio(
    State(state): State<AppState>,
    upload: AudioUpload,
) -> Result<Json<ChatAudioResponse>, ApiError> {
    let request = TurnRequest {
        user_id: upload.user_id,
        pre_prompt: upload.pre_prompt,
        history: upload.history,
    };
    let turn = state.turns.audio_turn(&request, &upload.audio).await?;

    Ok(Json(to_audio_response(turn)))
}

fn to_audio_response(turn: TurnResponse) -> ChatAudioResponse {
    ChatAudioResponse {
        texte_utilisateur: turn.user_text,
        audio_utilisateur_base64: turn.user_audio.unwrap_or_default(),
        reponse_assistant: turn.assistant_text,
        tts_audio_base64: turn.assistant_audio,
    }
}
