use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{
    ApiError, Backend, HealthStatus, HEALTH_PATH, HISTORY_PATH, LOGIN_PATH, LOGOUT_PATH,
    REGISTER_PATH, SEARCH_PATH, UPLOAD_PATH,
};
use crate::config::Config;
use crate::models::{
    Credentials, HistoryPage, Identity, Registration, ResumeFile, ScreeningResult,
    SearchResponse, UploadResponse,
};

/// Whether a 401 on this endpoint means "session gone" or "bad credentials".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Protected,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: Identity,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `reqwest`-backed backend with an in-memory cookie jar.
///
/// Redirects are never followed: the backend answers unauthenticated calls to
/// protected endpoints with a redirect to `/login`, which must be seen to be
/// classified as unauthorized.
pub struct HttpBackend {
    base_url: String,
    timeout: Option<Duration>,
    client: RwLock<Client>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: RwLock::new(build_client(timeout)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url, config.http_timeout)
    }

    fn client(&self) -> Client {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps in a client with an empty cookie jar.
    fn reset_cookies(&self) {
        let fresh = build_client(self.timeout);
        *self.client.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn build_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder()
        .cookie_store(true)
        .redirect(Policy::none());
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("Failed to build HTTP client")
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, credentials: &Credentials<'_>) -> Result<Identity, ApiError> {
        debug!("POST {LOGIN_PATH} as {}", credentials.username);
        let response = self
            .client()
            .post(self.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await?;
        let body: AuthResponse = decode(response, Access::Public).await?;
        Ok(body.user)
    }

    async fn register(&self, registration: &Registration<'_>) -> Result<Identity, ApiError> {
        debug!("POST {REGISTER_PATH} as {}", registration.username);
        let response = self
            .client()
            .post(self.url(REGISTER_PATH))
            .json(registration)
            .send()
            .await?;
        let body: AuthResponse = decode(response, Access::Public).await?;
        Ok(body.user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        debug!("GET {LOGOUT_PATH}");
        let sent = self.client().get(self.url(LOGOUT_PATH)).send().await;
        // Local cookies go regardless of what the server says.
        self.reset_cookies();

        let response = sent?;
        let status = response.status();
        // The backend redirects home on success; 401 means the session was already gone.
        if status.is_success() || status.is_redirection() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn upload(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<ScreeningResult, ApiError> {
        debug!(
            "POST {UPLOAD_PATH}: {} ({} bytes)",
            resume.file_name,
            resume.bytes.len()
        );
        let part = Part::bytes(resume.bytes.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str(resume.content_type)?;
        let form = Form::new()
            .part("resume", part)
            .text("job_description", job_description.to_string());

        let response = self
            .client()
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        let body: UploadResponse = decode(response, Access::Protected).await?;
        Ok(body.into_result())
    }

    async fn search(&self, keyword: &str) -> Result<SearchResponse, ApiError> {
        debug!("GET {SEARCH_PATH}?keyword={keyword}");
        let response = self
            .client()
            .get(self.url(SEARCH_PATH))
            .query(&[("keyword", keyword)])
            .send()
            .await?;
        decode(response, Access::Protected).await
    }

    async fn history(&self, limit: u32, offset: u32) -> Result<HistoryPage, ApiError> {
        debug!("GET {HISTORY_PATH}?limit={limit}&offset={offset}");
        let response = self
            .client()
            .get(self.url(HISTORY_PATH))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        decode(response, Access::Protected).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.client().get(self.url(HEALTH_PATH)).send().await?;
        decode(response, Access::Public).await
    }
}

/// Classifies the status, then parses the body as JSON.
async fn decode<T: DeserializeOwned>(response: Response, access: Access) -> Result<T, ApiError> {
    let status = response.status();

    if access == Access::Protected
        && (status == StatusCode::UNAUTHORIZED || redirects_to_login(&response))
    {
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn redirects_to_login(response: &Response) -> bool {
    if !response.status().is_redirection() {
        return false;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|location| location_path(location) == LOGIN_PATH)
        .unwrap_or(false)
}

/// Path component of a `Location` header, absolute or relative.
fn location_path(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Pulls `error` out of a `{ "error": ... }` body; otherwise the trimmed body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}
