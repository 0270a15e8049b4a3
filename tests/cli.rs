use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("embed_query").unwrap()
}

#[test]
fn requires_a_config_file_argument() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn rejects_unknown_log_level() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["config.ini", "--log", "VERBOSE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERBOSE"));
}

#[test]
fn fails_on_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("no-such-config.ini")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fatal error"));
}

#[test]
fn fails_on_config_missing_required_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.ini");
    std::fs::write(&config, "[Settings]\nmodel_id = some/model\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("config.ini")
        .assert()
        .failure()
        .stderr(predicate::str::contains("json_file_path"));
}

#[test]
fn creates_the_log_file_on_start() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("no-such-config.ini")
        .assert()
        .failure();

    assert!(dir.path().join("log").join("pipeline.log").exists());
}
