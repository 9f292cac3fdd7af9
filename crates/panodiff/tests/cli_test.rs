//! Integration tests for the `panodiff` binary.
//!
//! Argument validation and help output run without any server; the
//! end-to-end tests drive the full pipeline against a wiremock Panorama.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `panodiff` binary with env isolation.
fn panodiff_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("panodiff");
    cmd.env_remove("PANO_URL")
        .env_remove("PANO_API_KEY")
        .env_remove("PANO_INSECURE");
    cmd
}

const CANDIDATE_CMD: &str = "<show><config><candidate/></config></show>";
const RUNNING_CMD: &str = "<show><config><running/></config></show>";

fn config_body(extra_rule: bool) -> String {
    let extra = if extra_rule {
        r#"<entry name="new-rule"/>"#
    } else {
        ""
    };
    format!(
        r#"<response status="success"><result><config><devices>
             <entry name="localhost.localdomain">
               <device-group>
                 <entry name="branch"><rules><entry name="allow-dns"/>{extra}</rules></entry>
               </device-group>
             </entry>
           </devices></config></result></response>"#
    )
}

async fn mount_snapshot(server: &MockServer, cmd: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("type", "op"))
        .and(query_param("cmd", cmd))
        .and(header("X-PAN-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_is_a_usage_error() {
    // --url is required at the parser level.
    let output = panodiff_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--url"), "stderr:\n{stderr}");
}

#[test]
fn help_lists_the_selector_flags() {
    panodiff_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--device-group")
            .and(predicate::str::contains("--template"))
            .and(predicate::str::contains("--template-stack"))
            .and(predicate::str::contains("--api-key")),
    );
}

#[test]
fn version_flag() {
    panodiff_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("panodiff"));
}

// ── Argument validation (no network call involved) ──────────────────

#[test]
fn missing_api_key_is_a_usage_error() {
    // Unroutable TEST-NET address: if validation ran after the fetch this
    // would hang or fail differently.
    panodiff_cmd()
        .args(["--url", "192.0.2.1", "--device-group", "branch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn missing_selector_is_a_usage_error() {
    panodiff_cmd()
        .args(["--url", "192.0.2.1", "--api-key", "k"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--device-group"));
}

// ── End-to-end against a mock Panorama ──────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn identical_configs_print_nothing() {
    let server = MockServer::start().await;
    mount_snapshot(&server, CANDIDATE_CMD, config_body(false)).await;
    mount_snapshot(&server, RUNNING_CMD, config_body(false)).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        panodiff_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "--device-group", "branch"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("no differences found"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn added_rule_prints_unified_diff() {
    let server = MockServer::start().await;
    mount_snapshot(&server, CANDIDATE_CMD, config_body(true)).await;
    mount_snapshot(&server, RUNNING_CMD, config_body(false)).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        panodiff_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "--device-group", "branch"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("@@")
                    .and(predicate::str::contains(r#"+      <entry name="new-rule"/>"#)),
            );
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_group_exits_with_not_found_code() {
    let server = MockServer::start().await;
    mount_snapshot(&server, CANDIDATE_CMD, config_body(false)).await;
    mount_snapshot(&server, RUNNING_CMD, config_body(false)).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        panodiff_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "--device-group", "nope"])
            .assert()
            .code(4)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("matched nothing"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_failure_exits_nonzero_without_diff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        panodiff_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "--device-group", "branch"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_key_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        panodiff_cmd()
            .args(["--url", &uri, "--api-key", "bad-key", "--device-group", "branch"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("API key"));
    })
    .await
    .unwrap();
}
