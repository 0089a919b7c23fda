use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::error::VocabError;

pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to parse generated vocabulary";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate vocabulary";

/// HTTP face of [`VocabError`]: `{"error": message}` with a 400 or 500 status.
#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<VocabError> for ApiError {
    fn from(err: VocabError) -> Self {
        match err {
            VocabError::Validation(message) => ApiError::bad_request(message),
            VocabError::Upstream(message) => {
                error!("Generation failed: {}", message);
                if message.trim().is_empty() {
                    ApiError::internal(GENERATION_FAILED_MESSAGE)
                } else {
                    ApiError::internal(message)
                }
            }
            VocabError::Extraction(err) => {
                error!("Error parsing JSON: {:?}", err);
                ApiError::internal(EXTRACTION_FAILED_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
