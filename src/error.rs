// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types and the failure results surfaced to views.

use crate::storage::StorageError;

/// Error returned by the booking API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Authentication required")]
    Unauthorized(Option<String>),

    #[error("Resource not found: {}", .0.as_deref().unwrap_or("no details"))]
    NotFound(Option<String>),

    #[error("Invalid request: {}", .0.as_deref().unwrap_or("no details"))]
    Validation(Option<String>),

    #[error("Server error (HTTP {status})")]
    Server { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Credential store error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Message supplied by the server in the error payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized(msg)
            | ClientError::NotFound(msg)
            | ClientError::Validation(msg)
            | ClientError::Server { message: msg, .. } => msg.as_deref(),
            ClientError::Transport(_) | ClientError::Decode(_) | ClientError::Storage(_) => None,
        }
    }

    /// True for missing, invalid or expired credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// Convert into the failure shown to the user, preferring the server's
    /// message over `fallback`.
    pub fn into_failure(self, fallback: &str) -> ActionFailure {
        let message = self
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback);
        ActionFailure::new(message)
    }
}

/// Failure of a user-initiated action, carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionFailure {
    pub message: String,
}

impl ActionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a user action (login, booking, ...). Never an unhandled error.
pub type ActionResult<T> = std::result::Result<T, ActionFailure>;

/// Result type alias for API calls.
pub type Result<T> = std::result::Result<T, ClientError>;
