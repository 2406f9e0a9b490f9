use std::time::Duration;

use tactight_core::GeneratedArtifact;

use crate::error::GenerateError;

/// Cooldown the generation service enforces between requests from one client.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(20);

/// What a single generation request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// A non-empty STL payload.
    Success(GeneratedArtifact),

    /// HTTP 429. The caller may retry once `retry_after` has passed.
    RateLimited { retry_after: Duration },

    /// Any other non-success status, with the service's message.
    ServerError(String),

    /// A success status with a zero-length body.
    EmptyPayload,

    /// No response was received.
    NetworkFailure(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        match self {
            Self::Success(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<GeneratedArtifact, GenerateError> {
        match self {
            Self::Success(artifact) => Ok(artifact),
            Self::RateLimited { retry_after } => Err(GenerateError::RateLimited { retry_after }),
            Self::ServerError(message) => Err(GenerateError::Server(message)),
            Self::EmptyPayload => Err(GenerateError::EmptyPayload),
            Self::NetworkFailure(message) => Err(GenerateError::Network(message)),
        }
    }
}
