use std::sync::Arc;

use tactight_core::{GenerationRequest, Session, ValidationError};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::classify;
use crate::data::RequestOutcome;
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Generation endpoint, relative to the API base.
pub const GENERATE_PATH: &str = "generate-stl/";

const ACCEPT_STL: &str = "application/sla, application/octet-stream, */*";

/// Parse an API base URL so relative paths join beneath it.
///
/// `http://host/api` and `http://host/api/` both yield `http://host/api/`.
pub fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{raw}: cannot be a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Issues generation requests and keeps the session's artifact slot current.
///
/// One request per call, no retry. The only state it touches is the
/// [`Session`] handed in, and only on success.
pub struct Generator<C: HttpClient> {
    client:   C,
    endpoint: Url,
    headers:  Arc<[(String, String)]>,
}

impl<C: HttpClient> Generator<C> {
    /// Create a generator talking to `{base}/generate-stl/`.
    pub fn new(client: C, base: &Url) -> Result<Self> {
        let endpoint = base
            .join(GENERATE_PATH)
            .map_err(|e| Error::InvalidUrl(format!("{base}{GENERATE_PATH}: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            headers: Arc::from(vec![("Accept".to_string(), ACCEPT_STL.to_string())]),
        })
    }

    pub fn client(&self) -> &C { &self.client }

    pub fn endpoint(&self) -> &Url { &self.endpoint }

    /// Full request URL for `request`.
    pub fn request_url(&self, request: &GenerationRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("springThickness", &request.thickness.to_string())
            .append_pair("strapWidth", &request.strap_width.to_string());
        url
    }

    /// Request an STL for `request`.
    ///
    /// Invalid parameters fail before any network traffic. Every response,
    /// including failures, comes back as a [`RequestOutcome`]; on
    /// [`RequestOutcome::Success`] the artifact also replaces the one held by
    /// `session`. Other outcomes leave `session` untouched.
    pub async fn request_artifact(
        &self,
        session: &mut Session,
        request: &GenerationRequest,
    ) -> std::result::Result<RequestOutcome, ValidationError> {
        request.validate()?;

        let url = self.request_url(request);
        debug!(%url, "requesting STL generation");

        let outcome = match self.client.get(&url, &self.headers).await {
            Ok(response) => classify(response, || request.synthesized_filename()),
            Err(err) => RequestOutcome::NetworkFailure(err.to_string()),
        };

        match &outcome {
            RequestOutcome::Success(artifact) => {
                info!(
                    filename = artifact.suggested_filename(),
                    size = artifact.size_bytes(),
                    "STL generated"
                );
                session.replace_artifact(artifact.clone());
            }
            RequestOutcome::RateLimited { retry_after } => {
                warn!(retry_after_secs = retry_after.as_secs(), "generation rate limited");
            }
            RequestOutcome::ServerError(message) => error!(%message, "generation failed"),
            RequestOutcome::EmptyPayload => error!("generation returned an empty payload"),
            RequestOutcome::NetworkFailure(message) => error!(%message, "generation request failed"),
        }

        Ok(outcome)
    }
}
