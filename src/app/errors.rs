//! Transport errors shared by the identity and course clients. Non-success
//! responses keep their status and a short message pulled from the body, so
//! callers can tell a rejected request (`Http`) from an unreachable service.

use std::fmt;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Builds the error for a non-success response. Identity services answer
    /// `{"error":{"message":"EMAIL_EXISTS"}}`; other APIs may use a top-level
    /// `message` or `error` string, or plain text.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        AppError::Http {
            status,
            message: error_message(body),
        }
    }

    /// Maps transport failures, telling timeouts apart from unreachable hosts.
    /// The URL is dropped because it may carry the API key.
    #[must_use]
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_builder() {
            AppError::Serialization(format!("Failed to build request: {}", err.without_url()))
        } else {
            AppError::Network(format!(
                "Unable to reach the server: {}",
                err.without_url()
            ))
        }
    }

    /// HTTP status of a rejected request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the service answered and refused the request itself (4xx).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        value
            .pointer("/error/message")
            .or_else(|| value.get("error").filter(|error| error.is_string()))
            .or_else(|| value.get("message"))
            .and_then(serde_json::Value::as_str)
    });

    sanitize_body(message.unwrap_or(body))
}

/// Trims and truncates; an empty body gets a generic message.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
