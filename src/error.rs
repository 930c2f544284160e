use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode interaction: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Documentation lookup failed for '{symbol}': {message}")]
    Lookup { symbol: String, message: String },

    #[error("Documentation lookup for '{symbol}' timed out after {seconds}s")]
    LookupTimeout { symbol: String, seconds: u64 },
}

impl BotError {
    /// HTTP status returned to the interaction sender for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BotError::Decode(_) | BotError::MalformedCommand(_) => StatusCode::BAD_REQUEST,
            BotError::Config(_)
            | BotError::Io(_)
            | BotError::Encode(_)
            | BotError::Lookup { .. }
            | BotError::LookupTimeout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        // Error responses carry no body.
        self.status_code().into_response()
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
