//! The single failure kind of a completion lookup.

use hyper::StatusCode;

/// "Completion request failed", broken down by where it failed.
///
/// Every variant is handled the same way by the TUI (logged, field left
/// unchanged); the split exists for diagnostics and tests.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("invalid completion service url: {0}")]
    Url(#[from] url::ParseError),

    #[error("url {0} is not a valid request uri")]
    Uri(String),

    #[error("session cookie is not a valid header value")]
    InvalidCookie,

    #[error("completion request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("completion service answered {0}")]
    Status(StatusCode),

    #[error("reading completion response failed: {0}")]
    Body(#[from] hyper::Error),

    #[error("completion response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
