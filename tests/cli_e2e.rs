//! End-to-end CLI tests for the civfetch binary.
//!
//! The full pipeline runs against a mock HTTP server: resolution via
//! redirect, then the streamed download. `HOME` is pointed at a temp
//! directory so the token store reads a pre-seeded token file.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "e2e-test-token";

/// Creates a fake home directory with a pre-seeded token file.
fn seeded_home() -> TempDir {
    let home = TempDir::new().expect("temp home");
    let token_dir = home.path().join(".civitai");
    std::fs::create_dir_all(&token_dir).expect("token dir");
    std::fs::write(token_dir.join("config"), TOKEN).expect("token file");
    home
}

#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("civfetch").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Model ID or full URL"));
}

#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("civfetch").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("civfetch"));
}

#[test]
fn test_binary_without_args_fails_with_usage() {
    let mut cmd = Command::cargo_bin("civfetch").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// The mock server runs on worker threads while the test thread blocks on the
// child process, so these tests need the multi-thread runtime flavor.
#[tokio::test(flavor = "multi_thread")]
async fn test_e2e_download_writes_single_file_with_full_payload() {
    let mock_server = MockServer::start().await;
    let payload = b"full concatenation of all streamed chunks".to_vec();

    let location = format!(
        "{}/files/signed?response-content-disposition=\
         attachment%3B%20filename%3D%22model.safetensors%22",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/download/models/12345"))
        .and(header("authorization", format!("Bearer {TOKEN}")))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/signed"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&mock_server)
        .await;

    let home = seeded_home();
    let out_dir = TempDir::new().expect("out dir");
    // The output directory is created by the engine if absent.
    let nested_out = out_dir.path().join("models");

    let mut cmd = Command::cargo_bin("civfetch").unwrap();
    cmd.env("HOME", home.path())
        .arg(format!("{}/api/download/models/12345", mock_server.uri()))
        .arg(&nested_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Download completed"));

    let entries: Vec<_> = std::fs::read_dir(&nested_out)
        .expect("output dir exists")
        .collect();
    assert_eq!(entries.len(), 1, "exactly one file is written");

    let written = std::fs::read(nested_out.join("model.safetensors")).expect("output file");
    assert_eq!(written, payload);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_e2e_not_found_prints_single_error_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/download/models/404404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let home = seeded_home();
    let out_dir = TempDir::new().expect("out dir");

    let mut cmd = Command::cargo_bin("civfetch").unwrap();
    cmd.env("HOME", home.path())
        .arg(format!("{}/api/download/models/404404", mock_server.uri()))
        .arg(out_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR: "))
        .stderr(predicate::str::contains("not found"));
}
