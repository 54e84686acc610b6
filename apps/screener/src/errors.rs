use thiserror::Error;

use crate::api::ApiError;

/// Login/registration failure. The `Display` text is what the form shows inline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Could not reach the server. Please try again.")]
    Unreachable,
}

impl AuthError {
    /// Maps a backend failure onto a form message, falling back to `default_message`
    /// when the backend gave no usable text.
    pub fn from_api(err: ApiError, default_message: &str) -> Self {
        match err {
            ApiError::Rejected { message, .. } if !message.trim().is_empty() => {
                AuthError::Rejected(message)
            }
            ApiError::Http(e) => {
                tracing::warn!("Auth request failed: {e}");
                AuthError::Unreachable
            }
            other => {
                tracing::warn!("Auth request rejected: {other}");
                AuthError::Rejected(default_message.to_string())
            }
        }
    }
}

/// Why a file could not be selected for screening.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Only PDF or DOCX files are accepted (got '{0}')")]
    UnsupportedType(String),

    #[error("Could not read resume file: {0}")]
    Io(#[from] std::io::Error),
}
