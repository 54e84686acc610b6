//! Per-form request lifecycle: `Idle -> Submitting -> {Succeeded, Failed, Unauthorized}`.

use tracing::warn;

use crate::api::ApiError;

/// State of one form's most recent submission.
///
/// `Submitting` carries no payload: the previous result is dropped the moment a new
/// request starts, so nothing stale is shown while it is in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Submitting,
    Succeeded(T),
    /// Carries the generic message shown to the user, never the underlying error.
    Failed(String),
    Unauthorized,
}

impl<T> RequestState<T> {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Terminal state for a finished request. Backend failures collapse to
    /// `failure_message`; the cause goes to the log.
    pub fn settle(outcome: Result<T, ApiError>, failure_message: &str) -> Self {
        match outcome {
            Ok(value) => RequestState::Succeeded(value),
            Err(ApiError::Unauthorized) => RequestState::Unauthorized,
            Err(e) => {
                warn!("Request failed: {e}");
                RequestState::Failed(failure_message.to_string())
            }
        }
    }
}

/// First half of a submit: either nothing to send, or the request to send.
#[derive(Debug)]
pub enum Begin<R> {
    /// Required input missing, or a request already in flight.
    Skipped,
    /// No session; the caller must redirect to login.
    Unauthorized,
    Send(R),
}

/// What a submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Required input missing, or a request already in flight; nothing was sent.
    Skipped,
    Succeeded,
    Failed,
    /// The backend no longer recognises the session; the caller must redirect to login.
    Unauthorized,
}

impl<T> From<&RequestState<T>> for Submission {
    fn from(state: &RequestState<T>) -> Self {
        match state {
            RequestState::Succeeded(_) => Submission::Succeeded,
            RequestState::Failed(_) => Submission::Failed,
            RequestState::Unauthorized => Submission::Unauthorized,
            RequestState::Idle | RequestState::Submitting => Submission::Skipped,
        }
    }
}
