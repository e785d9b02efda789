//! CLI integration tests for atomitter

use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com/</link>
    <description>Posts</description>
    <item>
      <title>Hello</title>
      <link>https://example.com/hello</link>
    </item>
    <item>
      <title>Again</title>
      <link>https://example.com/again</link>
    </item>
  </channel>
</rss>"#;

/// Escape backslashes for a TOML basic string
fn escape_for_toml(value: &str) -> String {
    value.replace('\\', "\\\\")
}

fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

#[test]
fn test_help_flag_output() {
    let mut cmd = Command::cargo_bin("atomitter").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Post new RSS/Atom feed items"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_flag_output() {
    let mut cmd = Command::cargo_bin("atomitter").unwrap();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("atomitter"));
}

#[test]
fn test_invalid_log_format_rejected() {
    let mut cmd = Command::cargo_bin("atomitter").unwrap();

    cmd.arg("--log-format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log format"));
}

#[test]
fn test_bad_template_exit_code_and_config_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        "feed_url = \"http://127.0.0.1:9/feed.atom\"\nformat = \"{{ .Title }\"\n",
    );

    let mut cmd = Command::cargo_bin("atomitter").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template error"));

    // Missing keys were filled in before the template was compiled
    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("consumer_key = \"CONSUMER_KEY\""));
    assert!(written.contains("feed_url = \"http://127.0.0.1:9/feed.atom\""));
}

#[test]
fn test_config_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "format = \"{{ Title }}\"\n");

    let mut cmd = Command::cargo_bin("atomitter").unwrap();
    cmd.env("ATOMITTER_CONFIG", &config_path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid action"));
}

/// Serve the feed and a timeline that already holds the "Again" item
async fn start_feed_and_timeline() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id_str": "1",
            "text": "New: Again https://t.co/x",
            "entities": { "urls": [{
                "url": "https://t.co/x",
                "expanded_url": "https://example.com/again"
            }] }
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    mock_server
}

fn write_mock_config(temp_dir: &TempDir, mock_server: &MockServer) -> PathBuf {
    write_config(
        temp_dir,
        &format!(
            "feed_url = \"{}/feed.xml\"\napi_url = \"{}\"\nusername = \"someone\"\nformat = \"New: {{{{ .Title }}}} {{{{ .Link }}}}\"\n",
            escape_for_toml(&mock_server.uri()),
            escape_for_toml(&mock_server.uri()),
        ),
    )
}

async fn run_atomitter(args: Vec<String>) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("atomitter")
            .unwrap()
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_lists_pending_posts() {
    let mock_server = start_feed_and_timeline().await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_mock_config(&temp_dir, &mock_server);

    let output = run_atomitter(vec![
        "--config".to_string(),
        config_path.display().to_string(),
        "--dry-run".to_string(),
    ])
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("New: Hello https://example.com/hello"))
        .stdout(predicate::str::contains("New: Again").not())
        .stdout(predicate::str::contains("Would post 1 of 2 feed item(s)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_summary() {
    let mock_server = start_feed_and_timeline().await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_mock_config(&temp_dir, &mock_server);

    let output = run_atomitter(vec![
        "--config".to_string(),
        config_path.display().to_string(),
        "--dry-run".to_string(),
        "--format".to_string(),
        "json".to_string(),
    ])
    .await;

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["feed_items"], 2);
    assert_eq!(report["timeline_posts"], 1);
    assert_eq!(report["posted"], 0);
    assert_eq!(report["dry_run"], true);
    assert_eq!(
        report["pending"],
        serde_json::json!(["New: Hello https://example.com/hello"])
    );
}

#[test]
fn test_invalid_output_format_rejected() {
    let mut cmd = Command::cargo_bin("atomitter").unwrap();

    cmd.arg("--format").arg("csv").assert().failure();
}
