use tactight_core::GeneratedArtifact;

use crate::core::{error_message, filename_from_content_disposition};
use crate::data::{HttpResponse, RATE_LIMIT_COOLDOWN, RequestOutcome};

const TOO_MANY_REQUESTS: u16 = 429;

/// Decide the outcome of a generation response.
///
/// `fallback_filename` is only called when the response carries no usable
/// `Content-Disposition` name.
pub fn classify(response: HttpResponse, fallback_filename: impl FnOnce() -> String) -> RequestOutcome {
    if response.status == TOO_MANY_REQUESTS {
        return RequestOutcome::RateLimited {
            retry_after: RATE_LIMIT_COOLDOWN,
        };
    }

    if !response.is_success() {
        return RequestOutcome::ServerError(error_message(&response.body));
    }

    let filename = response
        .content_disposition
        .as_deref()
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(fallback_filename);

    match GeneratedArtifact::from_payload(response.body, filename) {
        Some(artifact) => RequestOutcome::Success(artifact),
        None => RequestOutcome::EmptyPayload,
    }
}
