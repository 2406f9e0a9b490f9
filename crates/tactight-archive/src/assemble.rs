use bytes::Bytes;
use futures_util::future::join_all;
use tactight_core::{Session, is_well_formed_filename};
use tactight_fetch::HttpClient;
use tracing::{debug, info, warn};
use url::Url;

use crate::data::{ArchiveBundle, CompanionFile, CompanionWarning};
use crate::error::{Error, Result};

/// Builds kit bundles from the session's artifact and the companion files.
pub struct ArchiveAssembler<C: HttpClient> {
    client:     C,
    site:       Url,
    companions: Vec<CompanionFile>,
}

impl<C: HttpClient> ArchiveAssembler<C> {
    /// `site` is the base companion paths are resolved against.
    pub fn new(client: C, site: Url, companions: Vec<CompanionFile>) -> Self {
        Self {
            client,
            site,
            companions,
        }
    }

    pub fn companions(&self) -> &[CompanionFile] { &self.companions }

    /// Collect the held artifact and every reachable companion.
    ///
    /// Companions are fetched concurrently. One that cannot be fetched is left
    /// out and recorded as a warning on the bundle, as is one whose entry name
    /// is not a bare file name. Only a missing artifact fails the call.
    pub async fn assemble_download_archive(&self, session: &Session) -> Result<ArchiveBundle> {
        let artifact = session.artifact().ok_or(Error::NoArtifact)?;

        let mut bundle = ArchiveBundle::new();
        bundle.insert(artifact.suggested_filename(), artifact.bytes().clone());

        let fetched = join_all(self.companions.iter().map(|companion| self.fetch_companion(companion))).await;

        for (companion, result) in self.companions.iter().zip(fetched) {
            let outcome = result.and_then(|bytes| {
                if bundle.insert(companion.name.clone(), bytes) {
                    Ok(())
                } else {
                    Err("name clashes with another entry".to_string())
                }
            });

            if let Err(reason) = outcome {
                warn!(name = %companion.name, %reason, "companion file skipped");
                bundle.warn(CompanionWarning {
                    name: companion.name.clone(),
                    reason,
                });
            }
        }

        info!(
            entries = bundle.len(),
            missing = bundle.warnings().len(),
            "download archive assembled"
        );

        Ok(bundle)
    }

    async fn fetch_companion(&self, companion: &CompanionFile) -> std::result::Result<Bytes, String> {
        // Entries are flat file names; never fetch one that would nest or escape.
        if !is_well_formed_filename(&companion.name) {
            return Err("invalid entry name".to_string());
        }

        let url = self
            .site
            .join(companion.path.trim_start_matches('/'))
            .map_err(|e| format!("invalid path {}: {e}", companion.path))?;
        debug!(%url, "fetching companion file");

        let response = self.client.get(&url, &[]).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }
        if response.body.is_empty() {
            return Err("empty response".to_string());
        }
        Ok(response.body)
    }
}
