use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Command running in an empty directory against the stub services
fn stub_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tweet-scheduler");
    cmd.current_dir(dir.path())
        .env("TWEET_SCHEDULER__SERVICES__BACKEND", "stub");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("tweet-scheduler");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tweet-scheduler hooks list"));

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("backend = \"http\""));
    assert!(content.contains("{tweets_file}"));
}

#[test]
fn hooks_list_shows_categories() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["hooks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question Hooks"))
        .stdout(predicate::str::contains("Statistics & Numbers"));
}

#[test]
fn hooks_search_filters_by_category_and_term() {
    let dir = TempDir::new().expect("temp dir");

    let output = stub_cmd(&dir)
        .args(["hooks", "search", "outcome", "--category", "question", "--json"])
        .output()
        .expect("run hooks search");

    let results = stdout_json(&output);
    let results = results.as_array().expect("array of hooks");
    assert!(!results.is_empty());
    for hook in results {
        assert!(hook.as_str().unwrap().to_lowercase().contains("outcome"));
    }
}

#[test]
fn hooks_search_unknown_category_finds_nothing() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["hooks", "search", "--category", "memes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hooks found."))
        .stderr(predicate::str::contains("unknown hook category: memes"));
}

#[test]
fn hooks_export_writes_ordered_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("hooks.json");

    stub_cmd(&dir)
        .args(["hooks", "export", "--path"])
        .arg(&path)
        .assert()
        .success();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let ids: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(ids, ["question", "challenge", "story", "authority", "stats"]);

    stub_cmd(&dir)
        .args(["hooks", "export", "--path"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn compose_article_appends_to_buffer() {
    let dir = TempDir::new().expect("temp dir");

    let output = stub_cmd(&dir)
        .args([
            "compose",
            "--text",
            "Draft tweet",
            "--article",
            "https://news.example.com/story",
            "--json",
        ])
        .output()
        .expect("run compose");

    let json = stdout_json(&output);
    assert_eq!(
        json["tweet_text"],
        "Draft tweet\n\nStub tweet for article https://news.example.com/story"
    );
    assert_eq!(json["tweets"].as_array().unwrap().len(), 2);
    assert!(json["last_error"].is_null());
}

#[test]
fn compose_schedule_prints_receipt() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["compose", "--text", "One\n\nTwo", "--schedule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tweets scheduled successfully"))
        .stdout(predicate::str::contains("Stub scheduled 2 tweets"));
}

#[test]
fn compose_submit_without_input_fails_validation() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["compose", "--submit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter tweets or paste images"));
}

#[test]
fn compose_schedule_without_tweets_fails_validation() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["compose", "--text", "   ", "--schedule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter tweets to schedule"));
}

#[test]
fn plan_outputs_rows() {
    let dir = TempDir::new().expect("temp dir");

    let output = stub_cmd(&dir)
        .args([
            "plan",
            "--text",
            "1\n\n2\n\n3\n\n4\n\n5\n\n6",
            "--start-date",
            "15/02/2025",
            "--json",
        ])
        .output()
        .expect("run plan");

    let rows = stdout_json(&output);
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "15/02/2025");
    assert_eq!(rows[0]["day"], "Saturday");
    assert_eq!(rows[0]["slots"].as_array().unwrap().len(), 5);
    assert_eq!(rows[1]["date"], "16/02/2025");
    assert_eq!(rows[1]["slots"][0]["characters"], "=LEN(D3)");
}

#[test]
fn plan_rejects_bad_date() {
    let dir = TempDir::new().expect("temp dir");

    stub_cmd(&dir)
        .args(["plan", "--text", "One", "--start-date", "2025-02-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DD/MM/YYYY"));
}
