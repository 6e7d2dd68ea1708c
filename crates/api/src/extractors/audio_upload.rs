use axum::extract::{FromRequest, Multipart, Request};

use crate::error::ApiError;

/// Multipart audio upload.
/// Fields: `file` (binary, required), `user_id`, `pre_prompt`, `history` (text, optional).
///
/// `history` may be repeated once per entry or sent once as a JSON array of strings.
#[derive(Debug, Default)]
pub struct AudioUpload {
    pub file_name: Option<String>,
    pub audio: Vec<u8>,
    pub user_id: String,
    pub pre_prompt: String,
    pub history: Vec<String>,
}

impl<S> FromRequest<S> for AudioUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e.body_text())))?;

        let mut upload = AudioUpload::default();
        let mut audio: Option<Vec<u8>> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    upload.file_name = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                    audio = Some(bytes.to_vec());
                }
                "user_id" | "pre_prompt" | "history" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?;
                    match name.as_str() {
                        "user_id" => upload.user_id = text,
                        "pre_prompt" => upload.pre_prompt = text,
                        _ => push_history(&mut upload.history, text),
                    }
                }
                _ => {}
            }
        }

        upload.audio = audio
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;

        Ok(upload)
    }
}

fn push_history(history: &mut Vec<String>, value: String) {
    if value.trim_start().starts_with('[') {
        if let Ok(entries) = serde_json::from_str::<Vec<String>>(&value) {
            history.extend(entries);
            return;
        }
    }
    history.push(value);
}
