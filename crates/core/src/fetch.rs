//! Page fetching from URLs and files.
//!
//! The network path is a single GET with a fixed timeout and no retries.
//! Non-success status codes are treated as failures, unlike a plain
//! `reqwest` call which hands back any response.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{DoclensError, Result};

/// HTTP client configuration for fetching documentation pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; doclens/0.1)".to_string() }
    }
}

/// Parses and checks a URL before any request is made.
fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| DoclensError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(DoclensError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            other
        ))),
    }
}

/// Fetches HTML content from a URL.
///
/// Performs one HTTP GET with the configured timeout and User-Agent. Redirects
/// follow reqwest's default policy. Timeouts, connection failures, and
/// non-2xx responses are all returned as errors.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = validate_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(DoclensError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                DoclensError::Timeout { timeout: config.timeout }
            } else {
                DoclensError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DoclensError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await.map_err(|e| {
        if e.is_timeout() {
            DoclensError::Timeout { timeout: config.timeout }
        } else {
            DoclensError::HttpError(e)
        }
    })?;

    tracing::info!(url, bytes = content.len(), "fetched page");

    Ok(content)
}

/// Reads HTML content from a local file, e.g. a saved copy of a page.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(DoclensError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(DoclensError::from)
    }
}
