use crate::models::ChatReply;
use axum::{http::StatusCode, Json};
use std::fmt;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const API_KEY_ERROR_MESSAGE: &str = "API key error. Please check your configuration.";
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please try again in a moment.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Why a chat request did not produce a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The request never reached the backend or the connection dropped.
    Network(String),
    /// The backend answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The body carried an `error` field.
    Backend(String),
    /// The body parsed but had no usable `response` field.
    InvalidResponse,
    /// The body was not JSON of the expected shape. The detail is kept for logs only.
    Decode(String),
}

impl ChatError {
    /// Maps the failure onto the fixed text shown in the message list.
    pub fn user_message(&self) -> &'static str {
        classify_failure(&self.to_string())
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(cause) => write!(f, "Failed to fetch: {cause}"),
            Self::Status { status, body } => {
                write!(f, "API request failed with status {status}: {body}")
            }
            Self::Backend(message) => f.write_str(message),
            Self::InvalidResponse => f.write_str("Invalid response format from AI"),
            Self::Decode(_) => f.write_str("Invalid response body"),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Checked in order against the lowercased description; first match wins.
pub fn classify_failure(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    if lowered.contains("failed to fetch") || lowered.contains("networkerror") {
        NETWORK_ERROR_MESSAGE
    } else if lowered.contains("401") {
        API_KEY_ERROR_MESSAGE
    } else if lowered.contains("429") {
        RATE_LIMIT_MESSAGE
    } else if lowered.contains("500") {
        SERVER_ERROR_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(ChatReply::error(self.message))).into_response()
    }
}
