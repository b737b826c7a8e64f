//! Error scenario integration tests

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lexai(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lexai").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("LEXAI_SERVICE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// URI of a local port with nothing listening on it
fn unreachable_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{port}")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let file = dir.join(name);
    std::fs::write(&file, contents).unwrap();
    file
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path())
        .args(["config", "get", "api_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_timeout() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path())
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn config_set_invalid_language() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path())
        .args(["config", "set", "language", "fr"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path()).args(["config", "init"]).assert().success();
    lexai(home.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_timeout_flag_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "case.pdf", "text");
    lexai(home.path())
        .arg("--file")
        .arg(&file)
        .args(["--question", "q", "--timeout", "later"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn invalid_language_flag_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path())
        .args(["--file", "case.pdf", "--question", "q", "--language", "fr"])
        .assert()
        .code(2);
}

#[test]
fn missing_document_file() {
    let home = tempfile::tempdir().unwrap();
    lexai(home.path())
        .args(["--file", "/nonexistent/case.pdf", "--question", "q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot open"));
}

#[test]
fn unsupported_document_type() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "notes.txt", "plain notes");
    lexai(home.path())
        .arg("--file")
        .arg(&file)
        .args(["--question", "q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PDF or DOCX"));
}

#[test]
fn oversized_document() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("bundle.pdf");
    std::fs::File::create(&file)
        .unwrap()
        .set_len(10 * 1024 * 1024 + 1)
        .unwrap();

    lexai(home.path())
        .arg("--file")
        .arg(&file)
        .args(["--question", "q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("10MB"));
}

#[test]
fn blank_question_is_not_submitted() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "case.pdf", "text");
    lexai(home.path())
        .arg("--file")
        .arg(&file)
        .args(["--question", "   ", "--service-url", "http://127.0.0.1:9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("enter a question"));
}

#[tokio::test(flavor = "multi_thread")]
async fn service_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model unavailable"))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "case.pdf", "text");
    let mut cmd = lexai(home.path());
    cmd.arg("--file")
        .arg(&file)
        .args(["--question", "q", "--service-url", &server.uri()]);

    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .code(1)
            .stderr(predicate::str::contains("500"))
            .stderr(predicate::str::contains("model unavailable"));
    })
    .await
    .unwrap();
}

#[test]
fn unreachable_service_is_network_error() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "case.pdf", "text");
    lexai(home.path())
        .arg("--file")
        .arg(&file)
        .args(["--question", "q", "--service-url", &unreachable_uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Network error"));
}

#[test]
fn corrupt_history_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("data").join("lexai");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("records.json"), "{not json").unwrap();

    lexai(home.path())
        .arg("history")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corrupt"));
}
