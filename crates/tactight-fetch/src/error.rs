//! Error types for tactight-fetch.

use std::time::Duration;

use tactight_core::ValidationError;
use thiserror::Error;

/// Setup failures: bad base URL or an HTTP client that cannot be built.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A generation attempt that did not yield an artifact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("rate limit exceeded, retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("server error: {0}")]
    Server(String),

    #[error("generated STL file is empty")]
    EmptyPayload,

    #[error("network error: {0}")]
    Network(String),
}

