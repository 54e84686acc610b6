use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
/// Every field has a default, so a bare environment yields a working local setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// No timeout unless HTTP_TIMEOUT_SECS is set.
    pub http_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Config {
            api_base_url: normalize_base_url(
                &std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            )?,
            http_timeout,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Replaces the backend origin, e.g. from a `--api-base-url` flag.
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;
    anyhow::ensure!(secs > 0, "HTTP_TIMEOUT_SECS must be greater than zero");
    Ok(Duration::from_secs(secs))
}

/// Validates the origin and strips trailing slashes so endpoint paths can be appended.
fn normalize_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(url).with_context(|| format!("API base URL '{url}' is not a valid URL"))?;
    Ok(url.to_string())
}
