//! Error types for the catalog API client.
//!
//! # Design
//! A failed call resolves to the server's error payload when a response
//! arrived, otherwise to the transport's own message. `NotFound` keeps a
//! dedicated variant so detail pages can show a "not found" state instead of
//! an error.

use serde_json::Value;

/// Shown whenever no response reached the client.
pub const CONNECTIVITY_MESSAGE: &str =
    "No response from server. Please check your internet connection.";

/// Body of a non-success response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Json(Value),
    Text(String),
    Empty,
}

impl ErrorPayload {
    /// Decode a response body, falling back to the raw text.
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return ErrorPayload::Empty;
        }
        match serde_json::from_str(body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(body.to_string()),
        }
    }

    /// The payload's `message` field if it has one, otherwise the payload
    /// verbatim. `None` for an empty body.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorPayload::Json(Value::Object(map)) => match map.get("message") {
                Some(Value::String(msg)) => Some(msg.clone()),
                _ => Some(Value::Object(map.clone()).to_string()),
            },
            ErrorPayload::Json(Value::String(msg)) => Some(msg.clone()),
            ErrorPayload::Json(Value::Null) => None,
            ErrorPayload::Json(other) => Some(other.to_string()),
            ErrorPayload::Text(text) => Some(text.clone()),
            ErrorPayload::Empty => None,
        }
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(msg) => f.write_str(&msg),
            None => f.write_str("Unknown error"),
        }
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Errors returned by services and `CatalogClient` parse methods.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 for the requested entity.
    #[error("resource not found")]
    NotFound { payload: ErrorPayload },

    /// The server answered with a non-2xx status other than 404.
    #[error("HTTP {status}: {payload}")]
    Server { status: u16, payload: ErrorPayload },

    /// No response reached the client.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Server-provided message, if a response carried one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::NotFound { payload } | ApiError::Server { payload, .. } => payload.message(),
            _ => None,
        }
    }

    /// Human-readable one-liner for the user.
    pub fn describe(&self) -> String {
        match self {
            ApiError::NotFound { payload } => format!("Error 404: {payload}"),
            ApiError::Server { status, payload } => format!("Error {status}: {payload}"),
            ApiError::Transport(_) => CONNECTIVITY_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
