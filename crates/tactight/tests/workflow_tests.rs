use std::io::Cursor;
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use httpmock::Method::GET;
use httpmock::MockServer;
use tactight::{BusyIndicator, Config, Error, RecordingNotifier, Severity, Workflow};
use tactight_fetch::{GenerateError, HttpClient, HttpResponse, ReqwestClient};
use tempfile::{TempDir, tempdir};
use url::Url;

fn can_bind_localhost() -> bool { TcpListener::bind("127.0.0.1:0").is_ok() }

fn config_for(server: &MockServer, output_dir: &Path) -> Config {
    Config {
        api_url: server.url("/api/"),
        site_url: server.url("/"),
        output_dir: output_dir.to_path_buf(),
        ..Config::default()
    }
}

fn workflow_for(server: &MockServer) -> (Workflow<ReqwestClient, RecordingNotifier>, TempDir) {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(
        ReqwestClient::new().unwrap(),
        &config_for(server, dir.path()),
        RecordingNotifier::new(),
        BusyIndicator::hidden(),
    )
    .unwrap();
    (workflow, dir)
}

async fn serve_strap(server: &MockServer, filename: &str) {
    let disposition = format!("attachment; filename=\"{filename}\"");
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/generate-stl/");
            then.status(200)
                .header("content-disposition", disposition.as_str())
                .body("solid strap\nendsolid strap\n");
        })
        .await;
}

#[tokio::test]
async fn generate_then_download_saves_the_stl() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start_async().await;
    serve_strap(&server, "TacTight_20240101_120000.stl").await;
    let (mut workflow, dir) = workflow_for(&server);

    let artifact = workflow.generate(Some(7.61), Some(30.0)).await.unwrap();
    assert_eq!(artifact.suggested_filename(), "TacTight_20240101_120000.stl");
    assert!(!workflow.busy().is_busy());

    let path = workflow.download_artifact().unwrap();
    assert_eq!(path, dir.path().join("TacTight_20240101_120000.stl"));
    assert_eq!(std::fs::read(&path).unwrap(), b"solid strap\nendsolid strap\n");

    let log = workflow.notifier().notifications();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].severity, Severity::Success);
    assert_eq!(
        log[0].message,
        "STL file \"TacTight_20240101_120000.stl\" generated successfully (0 KB)"
    );
    assert_eq!(log[1].message, "File \"TacTight_20240101_120000.stl\" downloaded successfully");
}

#[tokio::test]
async fn missing_inputs_warn_without_a_request() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|_when, then| {
            then.status(200).body("solid");
        })
        .await;
    let (mut workflow, _dir) = workflow_for(&server);

    let err = workflow.generate(None, Some(30.0)).await.unwrap_err();
    assert!(matches!(err, Error::MissingInput));
    let err = workflow.generate(Some(7.61), None).await.unwrap_err();
    assert!(matches!(err, Error::MissingInput));

    mock.assert_hits_async(0).await;
    let last = workflow.notifier().last().unwrap();
    assert_eq!(last.severity, Severity::Warning);
    assert_eq!(last.message, "Please fill in all fields");
}

#[tokio::test]
async fn out_of_range_force_is_a_processing_error() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|_when, then| {
            then.status(200).body("solid");
        })
        .await;
    let (mut workflow, _dir) = workflow_for(&server);

    let err = workflow.generate(Some(3.0), Some(30.0)).await.unwrap_err();
    assert!(matches!(err, Error::Generate(GenerateError::Validation(_))));

    mock.assert_hits_async(0).await;
    assert!(!workflow.busy().is_busy());
    let last = workflow.notifier().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert!(
        last.message
            .starts_with("Processing error: force must be between 4.92 N and 10.40 N"),
        "got {}",
        last.message
    );
}

#[tokio::test]
async fn rate_limit_warns_and_releases_busy_state() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/generate-stl/");
            then.status(429).body(r#"{"error":"Rate limit exceeded: 1 per 20 second"}"#);
        })
        .await;
    let (mut workflow, _dir) = workflow_for(&server);

    let err = workflow.generate(Some(7.61), Some(30.0)).await.unwrap_err();
    assert!(matches!(err, Error::Generate(GenerateError::RateLimited { .. })));
    assert!(!workflow.busy().is_busy());
    assert!(!workflow.session().has_artifact());

    let last = workflow.notifier().last().unwrap();
    assert_eq!(last.severity, Severity::Warning);
    assert_eq!(last.message, "Rate limit exceeded. Please wait 20 seconds before trying again.");
}

#[tokio::test]
async fn server_error_surfaces_service_message() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/generate-stl/");
            then.status(500)
                .header("content-type", "application/json")
                .body(r#"{"detail":"OpenSCAD error: parser failed"}"#);
        })
        .await;
    let (mut workflow, _dir) = workflow_for(&server);

    assert!(workflow.generate(Some(7.61), Some(30.0)).await.is_err());
    let last = workflow.notifier().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(last.message, "Error generating STL: OpenSCAD error: parser failed");
}

#[tokio::test]
async fn download_without_artifact_reports_error() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    let (workflow, dir) = workflow_for(&server);

    let err = workflow.download_artifact().unwrap_err();
    assert!(matches!(err, Error::Download(tactight_fs::Error::NoContent)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let err = workflow.download_kit().await.unwrap_err();
    assert!(matches!(err, Error::Archive(tactight_archive::Error::NoArtifact)));
    assert!(!workflow.busy().is_busy());

    let log = workflow.notifier().notifications();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|n| n.severity == Severity::Error));
}

#[tokio::test]
async fn kit_includes_reachable_companions_and_warns_about_the_rest() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start_async().await;
    serve_strap(&server, "strap.stl").await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/assets/TacTight_strap_clip.stl");
            then.status(200).body("solid clip");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/assets/TacTight_assembly_guide.pdf");
            then.status(404).body(r#"{"error":"Route not found"}"#);
        })
        .await;
    let (mut workflow, dir) = workflow_for(&server);

    workflow.generate(Some(7.61), Some(30.0)).await.unwrap();
    let path = workflow.download_kit().await.unwrap();
    assert_eq!(path, dir.path().join("TacTight_kit.zip"));

    let archive = zip::ZipArchive::new(Cursor::new(std::fs::read(&path).unwrap())).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["TacTight_strap_clip.stl", "strap.stl"]);

    let log = workflow.notifier().notifications();
    assert!(log.iter().any(|n| n.severity == Severity::Warning
        && n.message == "Companion file \"TacTight_assembly_guide.pdf\" unavailable: HTTP 404"));
    assert_eq!(
        workflow.notifier().last().unwrap().message,
        "File \"TacTight_kit.zip\" downloaded successfully"
    );
}

/// Answers every GET with a small STL and records whether the busy indicator
/// was on while the request was in flight.
#[derive(Clone)]
struct ObservingClient {
    busy:     BusyIndicator,
    saw_busy: Arc<AtomicBool>,
}

impl HttpClient for ObservingClient {
    type Error = std::io::Error;

    async fn get(&self, _url: &Url, _headers: &[(String, String)]) -> Result<HttpResponse, Self::Error> {
        self.saw_busy.store(self.busy.is_busy(), Ordering::SeqCst);
        Ok(HttpResponse::new(200, Bytes::from_static(b"solid observed")))
    }
}

#[tokio::test]
async fn busy_state_spans_the_request() {
    let busy = BusyIndicator::hidden();
    let saw_busy = Arc::new(AtomicBool::new(false));
    let client = ObservingClient {
        busy:     busy.clone(),
        saw_busy: Arc::clone(&saw_busy),
    };
    let dir = tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let mut workflow = Workflow::new(client, &config, RecordingNotifier::new(), busy).unwrap();

    let artifact = workflow.generate(Some(10.40), Some(26.0)).await.unwrap();

    assert!(saw_busy.load(Ordering::SeqCst));
    assert!(!workflow.busy().is_busy());
    assert_eq!(artifact.suggested_filename(), "TacTight_f10.4N_t5mm_w26mm.stl");
}
