use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Word already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("OpenAI API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAiApi(String),

    #[error("OpenAI returned no completion choices")]
    EmptyCompletion,

    #[error("Malformed completion: {0}")]
    MalformedCompletion(#[source] serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to HTTP clients. Store details and raw
    /// completion text stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(_) => "Word not found".to_string(),
            Self::Conflict(_) => "Failed to add word".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::MissingApiKey => "OpenAI API key not configured".to_string(),
            Self::Http(_)
            | Self::OpenAiApi(_)
            | Self::EmptyCompletion
            | Self::MalformedCompletion(_) => "Failed to generate content".to_string(),
            Self::Json(_) | Self::Io(_) | Self::TomlParse(_) | Self::Config(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Client error");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            AppError::BadRequest("Invalid word ID".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("word 'x'".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicate_word_is_a_server_error() {
        let err = AppError::Conflict("ephemeral".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to add word");
    }

    #[test]
    fn malformed_completion_does_not_leak_text() {
        let parse_err = serde_json::from_str::<serde_json::Value>("Sure! Here is {")
            .unwrap_err();
        let err = AppError::MalformedCompletion(parse_err);
        assert_eq!(err.public_message(), "Failed to generate content");
        assert!(!err.public_message().contains("Sure!"));
    }
}
