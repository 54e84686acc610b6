/// Backend client: the single point of entry for every HTTP call the screener makes.
///
/// ARCHITECTURAL RULE: views and the session store talk to the backend only through
/// the `Backend` trait. `HttpBackend` is the production implementation; tests swap in
/// a recording fake.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    Credentials, HistoryPage, Identity, Registration, ResumeFile, ScreeningResult, SearchResponse,
};

pub mod http;

pub use http::HttpBackend;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const SEARCH_PATH: &str = "/api/search";
pub const HISTORY_PATH: &str = "/api/history";
pub const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401, or a redirect to the login page from a protected endpoint.
    #[error("Authentication required")]
    Unauthorized,

    #[error("Backend rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `GET /api/health` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

/// Operations the client needs from the screening backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, credentials: &Credentials<'_>) -> Result<Identity, ApiError>;

    /// Creates the account; the backend logs the new user in on success.
    async fn register(&self, registration: &Registration<'_>) -> Result<Identity, ApiError>;

    /// Invalidates the server session and drops any cookies held locally.
    async fn logout(&self) -> Result<(), ApiError>;

    async fn upload(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<ScreeningResult, ApiError>;

    async fn search(&self, keyword: &str) -> Result<SearchResponse, ApiError>;

    /// The logged-in user's past screenings, newest first.
    async fn history(&self, limit: u32, offset: u32) -> Result<HistoryPage, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
