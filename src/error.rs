// Error types shared by the API client and the configuration loader.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the VK API.
///
/// Each category is rendered with its own message by the UI layer. Nothing
/// here is retried: a failed call is reported once and the flow stops.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached (DNS failure, refused connection...).
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// Connect or read timeout elapsed.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Non-2xx HTTP status.
    #[error("server responded with {status}")]
    Http { status: StatusCode },

    /// 2xx response whose envelope carries an `error` object.
    #[error("VK API error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Api { code: Option<i64>, message: String },

    /// Body was not valid JSON for the expected envelope.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Envelope parsed but a required field was absent.
    #[error("malformed response: missing `{0}`")]
    MissingField(&'static str),

    /// Per-interval click counts add up past `u64::MAX`.
    #[error("malformed response: click total overflows")]
    ClickOverflow,

    /// The URL has no key segment to look statistics up by.
    #[error("no link key in {0}")]
    InvalidLink(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the access token in the query string.
        let err = err.without_url();
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_connect() {
            ApiError::Connection(err)
        } else if let Some(status) = err.status() {
            ApiError::Http { status }
        } else {
            ApiError::Request(err)
        }
    }
}

/// Problems with the process environment or command-line overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("VK_TOKEN is not set")]
    MissingToken,

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}
