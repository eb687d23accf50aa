//! Integration tests for config file loading and precedence.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn noodlog() -> Command {
    let mut cmd = Command::cargo_bin("noodlog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/noodlog-test-no-config");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn config_file_sets_threshold() {
    let file = config_file("level = \"error\"\n");
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .args(["-l", "warn", "dropped"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn cli_threshold_overrides_config_file() {
    let file = config_file("level = \"error\"\n");
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .args(["-t", "debug", "-l", "warn", "kept"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept"));
}

#[test]
fn config_file_redaction_and_pretty() {
    let file = config_file(
        r#"
pretty = true
redact = true
sensitive_fields = ["secret"]
"#,
    );
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .arg(r#"{"secret":"s","visible":"v"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"secret\": \"**********\""))
        .stdout(predicate::str::contains("\n   \"message\": {"));
}

#[test]
fn config_file_custom_colors() {
    let file = config_file(
        r#"
colors = true

[custom_colors]
info = { rgb = [1, 2, 3] }
"#,
    );
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .arg("tinted")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\x1b[38;2;1;2;3m{"));
}

#[test]
fn color_flag_overrides_config_file() {
    let file = config_file("colors = true\n");
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .args(["--color=never", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn config_file_time_combined_with_flag() {
    let file = config_file(
        r#"
[time]
zone = "UTC"
format = "%H:%M"
"#,
    );
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .args(["--time-format", "%z", "t"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""time":"+0000""#));
}

#[test]
fn xdg_config_home_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("noodlog");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "pretty = true\n").unwrap();
    noodlog()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("from xdg")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n   \"level\""));
}

#[test]
fn invalid_config_file_exits_one() {
    let file = config_file("pretty = \"very\"\n");
    noodlog()
        .arg(format!("--config={}", file.path().display()))
        .arg("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("noodlog: "));
}

#[test]
fn missing_config_file_uses_defaults() {
    noodlog()
        .arg("--config=/nonexistent/noodlog/config.toml")
        .arg("fine")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"fine""#));
}
