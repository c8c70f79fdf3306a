// Server error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use talktalk_spk::SpeechError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error("Chat failed: {0}")]
    Chat(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Error returned from HTTP handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            error: error.into(),
            code,
        }
    }

    /// Mapping used by `/tts`
    pub fn from_synthesis(err: SpeechError) -> Self {
        match err {
            SpeechError::InvalidInput(msg) => Self::new(StatusCode::BAD_REQUEST, msg, "INVALID_INPUT"),
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Text-to-speech failed: {}", other.message()),
                "SYNTHESIS_FAILED",
            ),
        }
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Speech(e) => ApiError::from_synthesis(e),
            ServerError::Chat(msg) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, msg, "CHAT_FAILED")
            }
            ServerError::Config(msg) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, msg, "CONFIG_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error,
            code: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}
