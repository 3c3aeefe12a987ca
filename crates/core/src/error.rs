//! Error types for doclens operations.
//!
//! Two families live here. [`DoclensError`] covers everything that aborts an
//! analysis run: fetching, parsing, locating content, writing output.
//! [`ModelError`] covers a single language-model call; it never aborts a run
//! and is folded into a stage's placeholder assessment instead.
//!
//! # Example
//!
//! ```rust
//! use doclens_core::{DoclensError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(DoclensError::ContentNotFound);
//!     }
//!     Ok(html)
//! }
//! # assert!(require_html("").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch and extraction operations.
///
/// Any of these ends the analysis of a page; no partial report is produced.
#[derive(Error, Debug)]
pub enum DoclensError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// None of the content-region rules matched the page.
    #[error("Could not locate main article content")]
    ContentNotFound,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Report serialization errors.
    #[error("Failed to serialize report: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Invalid analyzer or model configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure of a single language-model invocation.
///
/// The display text of this error is embedded verbatim in the stage's
/// placeholder assessment, so it should stay short and human readable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("model request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    #[error("rate limited by model endpoint")]
    RateLimited,

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for DoclensError.
pub type Result<T> = std::result::Result<T, DoclensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DoclensError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_error() {
        let err = DoclensError::HttpStatus { status: 404, url: "https://example.com/missing".to_string() };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("https://example.com/missing"));
    }

    #[test]
    fn test_content_not_found_message() {
        let err = DoclensError::ContentNotFound;
        assert_eq!(err.to_string(), "Could not locate main article content");
    }

    #[test]
    fn test_timeout_error() {
        let err = DoclensError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::Api { status: 529, body: "overloaded".to_string() };
        assert_eq!(err.to_string(), "API error 529: overloaded");
        assert_eq!(ModelError::RateLimited.to_string(), "rate limited by model endpoint");
    }
}
