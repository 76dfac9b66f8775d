use std::path::PathBuf;

use axum::http::StatusCode;
use tracing::{error, warn};

use eventsphere_storage::StoreError;

pub const EMAIL_TAKEN_MESSAGE: &str = "Email already exists. Please use a different email.";

/// Failures of a request, before they are rendered for a particular surface
/// (JSON body or HTML page).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input that fails validation; the message is shown to the user as is.
    #[error("{0}")]
    Validation(String),

    /// The request body could not be decoded at all.
    #[error("unreadable request body: {0}")]
    Body(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not store upload {}: {source}", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Body(_)
            | Self::Store(StoreError::EmailTaken(_))
            | Self::Store(StoreError::UnknownEvent(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the caller. Server-side failures collapse to
    /// `fallback` so no internal detail leaks.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Body(_) => "The submitted data could not be read.".to_string(),
            Self::Store(StoreError::EmailTaken(_)) => EMAIL_TAKEN_MESSAGE.to_string(),
            Self::Store(StoreError::UnknownEvent(_)) => {
                "The selected event does not exist.".to_string()
            }
            _ => fallback.to_string(),
        }
    }

    /// Log at `error` for server-side failures, `warn` for rejected input.
    pub fn log(&self, action: &str) {
        if self.status().is_server_error() {
            error!("{} failed: {}", action, self);
        } else {
            warn!("{} rejected: {}", action, self);
        }
    }
}
