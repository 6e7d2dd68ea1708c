use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parole_services::{CompletionError, HealthError, TurnError};
use parole_speech::TranscriptionError;
use serde::Serialize;
use tracing::{error, warn};

pub const INAUDIBLE_MESSAGE: &str = "Impossible de comprendre l'audio";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Inaudible,
    Internal(String),
    ServiceUnavailable(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Inaudible => (
                StatusCode::BAD_REQUEST,
                "inaudible",
                INAUDIBLE_MESSAGE.to_string(),
            ),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                warn!(reason = %msg, "Service unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TranscriptionError> for ApiError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Inaudible => ApiError::Inaudible,
            TranscriptionError::BackendUnavailable(msg) => {
                ApiError::Internal(format!("Erreur API: {}", msg))
            }
            TranscriptionError::Processing(msg) | TranscriptionError::UnsupportedAudioFormat(msg) => {
                ApiError::Internal(format!("Erreur de traitement audio: {}", msg))
            }
        }
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Failure(msg) => ApiError::Internal(format!("Erreur LLM : {}", msg)),
        }
    }
}

impl From<TurnError> for ApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::Transcription(e) => e.into(),
            TurnError::Completion(e) => e.into(),
            TurnError::Encoding(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<HealthError> for ApiError {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::Overloaded { .. } => {
                ApiError::ServiceUnavailable("System under high load".to_string())
            }
            HealthError::Probe(msg) => {
                ApiError::ServiceUnavailable(format!("Health check failed: {}", msg))
            }
        }
    }
}
