//! The generate / download / download-kit flow behind every front end.

use std::path::PathBuf;

use tactight_archive::{ARCHIVE_NAME, ArchiveAssembler, CompanionWarning, PackedArchive};
use tactight_core::{CalibrationTable, GeneratedArtifact, GenerationRequest, Session};
use tactight_fetch::{GenerateError, Generator, HttpClient, base_url};
use tactight_fs::DownloadTrigger;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::notify::{Notifier, Severity};
use crate::ui::BusyIndicator;

pub const MISSING_INPUT_MESSAGE: &str = "Please fill in all fields";

/// Severity and text shown for a failed generation.
pub fn generation_failure_message(err: &GenerateError) -> (Severity, String) {
    match err {
        GenerateError::RateLimited { retry_after } => (
            Severity::Warning,
            format!(
                "Rate limit exceeded. Please wait {} seconds before trying again.",
                retry_after.as_secs()
            ),
        ),
        GenerateError::Server(message) => (Severity::Error, format!("Error generating STL: {message}")),
        GenerateError::EmptyPayload => (Severity::Error, "Generated STL file is empty".to_string()),
        GenerateError::Network(message) => (
            Severity::Error,
            format!("Network error: {message}. Please check your connection and try again."),
        ),
        GenerateError::Validation(err) => (Severity::Error, format!("Processing error: {err}")),
    }
}

pub fn generation_success_message(artifact: &GeneratedArtifact) -> String {
    format!(
        "STL file \"{}\" generated successfully ({} KB)",
        artifact.suggested_filename(),
        artifact.size_kb()
    )
}

fn companion_message(warning: &CompanionWarning) -> String {
    format!("Companion file \"{}\" unavailable: {}", warning.name, warning.reason)
}

pub struct Workflow<C: HttpClient + Clone, N: Notifier> {
    session:   Session,
    table:     CalibrationTable,
    generator: Generator<C>,
    assembler: ArchiveAssembler<C>,
    downloads: DownloadTrigger,
    notifier:  N,
    busy:      BusyIndicator,
}

impl<C: HttpClient + Clone, N: Notifier> Workflow<C, N> {
    pub fn new(client: C, config: &Config, notifier: N, busy: BusyIndicator) -> Result<Self> {
        let api = base_url(&config.api_url)?;
        let site = base_url(&config.site_url)?;

        Ok(Self {
            session: Session::new(),
            table: CalibrationTable::default(),
            generator: Generator::new(client.clone(), &api)?,
            assembler: ArchiveAssembler::new(client, site, config.companion_files()),
            downloads: DownloadTrigger::new(&config.output_dir),
            notifier,
            busy,
        })
    }

    pub fn session(&self) -> &Session { &self.session }

    pub fn notifier(&self) -> &N { &self.notifier }

    pub fn busy(&self) -> &BusyIndicator { &self.busy }

    /// Estimate the thickness for `force` and request a strap.
    ///
    /// Both inputs are required; a missing one is reported without any work
    /// being done. Every outcome is reported through the notifier, and the
    /// busy indicator is released before the report.
    pub async fn generate(&mut self, force: Option<f64>, strap_width: Option<f64>) -> Result<GeneratedArtifact> {
        let (Some(force), Some(strap_width)) = (force, strap_width) else {
            self.notifier.notify(Severity::Warning, MISSING_INPUT_MESSAGE);
            return Err(Error::MissingInput);
        };

        let result = {
            let _busy = self.busy.start("Generating", "requesting STL");
            self.request(force, strap_width).await
        };

        match &result {
            Ok(artifact) => self
                .notifier
                .notify(Severity::Success, &generation_success_message(artifact)),
            Err(err) => {
                let (severity, message) = generation_failure_message(err);
                self.notifier.notify(severity, &message);
            }
        }

        result.map_err(Error::from)
    }

    async fn request(&mut self, force: f64, strap_width: f64) -> std::result::Result<GeneratedArtifact, GenerateError> {
        let request = GenerationRequest::from_force(force, strap_width, &self.table)?;
        debug!(force, thickness = request.thickness, strap_width, "estimated spring thickness");

        self.generator
            .request_artifact(&mut self.session, &request)
            .await?
            .into_result()
    }

    /// Save the held STL under its suggested name.
    pub fn download_artifact(&self) -> Result<PathBuf> {
        let artifact = self.session.artifact();
        let result = self.downloads.trigger_download(
            artifact.map(|a| a.bytes().as_ref()),
            artifact.map_or("", |a| a.suggested_filename()),
        );
        self.report_download(result)
    }

    /// Bundle the held STL with the companion files and save the zip.
    pub async fn download_kit(&self) -> Result<PathBuf> {
        let packed = {
            let _busy = self.busy.start("Packing", ARCHIVE_NAME);
            self.pack_kit().await
        };

        let result = match packed {
            Ok(packed) => self
                .downloads
                .trigger_download(Some(packed.bytes.as_ref()), packed.name)
                .map_err(Error::from),
            Err(err) => Err(err),
        };
        self.report_download(result)
    }

    async fn pack_kit(&self) -> Result<PackedArchive> {
        let bundle = self.assembler.assemble_download_archive(&self.session).await?;
        for warning in bundle.warnings() {
            self.notifier.notify(Severity::Warning, &companion_message(warning));
        }
        Ok(bundle.pack()?)
    }

    fn report_download<E: Into<Error>>(&self, result: std::result::Result<PathBuf, E>) -> Result<PathBuf> {
        match result.map_err(Into::into) {
            Ok(path) => {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                self.notifier
                    .notify(Severity::Success, &format!("File \"{name}\" downloaded successfully"));
                Ok(path)
            }
            Err(err) => {
                error!(error = %err, "download failed");
                self.notifier.notify(Severity::Error, &format!("Processing error: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tactight_core::ValidationError;

    use super::*;

    #[test]
    fn rate_limit_is_a_warning() {
        let (severity, message) = generation_failure_message(&GenerateError::RateLimited {
            retry_after: Duration::from_secs(20),
        });
        assert_eq!(severity, Severity::Warning);
        assert_eq!(message, "Rate limit exceeded. Please wait 20 seconds before trying again.");
    }

    #[test]
    fn other_failures_are_errors() {
        let cases = [
            (
                GenerateError::Server("OpenSCAD error".into()),
                "Error generating STL: OpenSCAD error",
            ),
            (GenerateError::EmptyPayload, "Generated STL file is empty"),
            (
                GenerateError::Network("connection refused".into()),
                "Network error: connection refused. Please check your connection and try again.",
            ),
        ];
        for (err, expected) in cases {
            let (severity, message) = generation_failure_message(&err);
            assert_eq!(severity, Severity::Error);
            assert_eq!(message, expected);
        }

        let (severity, message) = generation_failure_message(&GenerateError::Validation(
            ValidationError::NotFinite { field: "force" },
        ));
        assert_eq!(severity, Severity::Error);
        assert!(message.starts_with("Processing error: "));
    }

    #[test]
    fn success_message_reports_kilobytes() {
        let artifact = GeneratedArtifact::from_payload(vec![b's'; 3 * 1024], "strap.stl").unwrap();
        assert_eq!(
            generation_success_message(&artifact),
            "STL file \"strap.stl\" generated successfully (3 KB)"
        );
    }
}
