pub mod auth;
pub mod client;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaigaError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("authentication rejected by the server (HTTP {0})")]
    Unauthorized(StatusCode),
    #[error("unexpected response from {context} (HTTP {status})")]
    Status { status: StatusCode, context: String },
}
