//! Error taxonomy for API calls
//!
//! Validation failures never reach this type, they live in
//! [`crate::validation::FieldErrors`].

use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a structured `{ "message": ... }` body.
    #[error("{message}")]
    App { status: u16, message: String },

    /// Anything else: transport loss, timeout, malformed or unstructured response.
    #[error("{0}")]
    Unknown(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Build the error for a non-2xx response from its raw body.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApiError::App {
                status,
                message: parsed.message,
            },
            Err(_) => ApiError::Unknown(format!("HTTP {} with unstructured body", status)),
        }
    }

    pub fn is_app_error(&self) -> bool {
        matches!(self, ApiError::App { .. })
    }

    /// Text shown to the user: the server message when there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::App { message, .. } => message.clone(),
            ApiError::Unknown(_) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            "Request timed out".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_decode() {
            format!("Malformed response: {}", e)
        } else {
            format!("Request failed: {}", e)
        };
        ApiError::Unknown(msg)
    }
}
