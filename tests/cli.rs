use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn hierex() -> Command {
    let mut cmd = Command::cargo_bin("hierex").unwrap();
    cmd.env_remove("HIEREX_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn extract_from_stdin_as_json() {
    let output = hierex()
        .args(["extract", "-"])
        .write_stdin("<h1 id=\"intro\">Intro</h1><p>Hello</p><h2>Details</h2><p>World</p>")
        .output()
        .unwrap();
    assert!(output.status.success());

    let documents: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = documents[0]["records"].as_array().unwrap();

    assert_eq!(documents[0]["source"], "-");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["content"], "Hello");
    assert_eq!(records[0]["anchor"], "intro");
    assert_eq!(records[0]["custom_ranking"]["heading"], 90);
    assert_eq!(records[1]["headings"], serde_json::json!(["Intro", "Details"]));
    assert_eq!(records[1]["hierarchy"]["lvl1"], "Details");
    assert_eq!(records[1]["custom_ranking"]["position"], 1);
}

#[test]
fn extract_directory_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.html"), "<p>one</p><p>two</p>").unwrap();
    std::fs::write(dir.path().join("b.html"), "<div>three</div>").unwrap();

    let output = hierex()
        .args(["-o", "jsonl", "extract", "-s", "p,div"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0]["source"].as_str().unwrap().ends_with("a.html"));
    assert_eq!(lines[2]["tag_name"], "div");
    assert_eq!(lines[2]["custom_ranking"]["position"], 0);
}

#[test]
fn excluded_tags_from_flag() {
    hierex()
        .args(["-o", "jsonl", "extract", "-x", "script", "-"])
        .write_stdin("<p>foo<script>evil()</script></p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"html\":\"<p>foo</p>\""))
        .stdout(predicate::str::contains("evil").not());
}

#[test]
fn config_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "content_selector = \"li\"\n").unwrap();

    hierex()
        .arg("--config")
        .arg(&config)
        .args(["-o", "text", "extract", "-"])
        .write_stdin("<ul><li>item</li></ul><p>para</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<li>"))
        .stdout(predicate::str::contains("para").not());
}

#[test]
fn invalid_selector_fails() {
    hierex()
        .args(["extract", "-s", "p[", "-"])
        .write_stdin("<p>foo</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn missing_only_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    hierex()
        .arg("extract")
        .arg(dir.path().join("nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No document could be extracted"));
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("hierex.toml");

    hierex()
        .arg("config")
        .arg("--init")
        .arg(&target)
        .assert()
        .success();

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("content_selector = \"p\""));

    hierex()
        .arg("config")
        .arg("--init")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_shows_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("c.toml");
    std::fs::write(&config, "content_selector = \"article p\"\n").unwrap();

    hierex()
        .arg("-c")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("article p"));
}
