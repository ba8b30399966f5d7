//! Integration tests for the markers binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, temp_fixture};

/// `markers` with a config path that does not exist, so defaults apply.
fn markers(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_markers"));
    cmd.arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .env_remove("MARKERS_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_shows_package_version() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_without_file_is_usage_error() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn list_json_in_timeline_order() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(markers(&temp).arg("list").arg(fixture("chapters.json")));

    insta::assert_snapshot!(stdout.trim_end(), @r"
    #1  00:10.000-00:15.000  Intro  [chapter]  16.7%
    #2  00:30.000  Middle  50.0%
    #0  00:45.000  Outro  [chapter]  75.0%
    ");
}

#[test]
fn list_toml_hides_markers_past_the_end() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(markers(&temp).arg("list").arg(fixture("chapters.toml")));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "#0  00:10.000  Intro  [chapter]  16.7%",
            "#1  00:30.000-00:35.000  Break  50.0%",
            "#2  01:30.000  Bonus  hidden",
        ]
    );
}

#[test]
fn list_duration_flag_overrides_file() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        markers(&temp)
            .arg("list")
            .arg(fixture("chapters.toml"))
            .args(["--duration", "120"]),
    );
    assert!(stdout.contains("#2  01:30.000  Bonus  75.0%"));
}

#[test]
fn list_bare_array_without_duration_has_no_positions() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(markers(&temp).arg("list").arg(fixture("bare_list.json")));
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["#1  00:01.000", "#0  00:02.500  second"]
    );
}

#[test]
fn list_cast_markers() {
    let (_temp_dir, path) = temp_fixture("session.cast");
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(markers(&temp).arg("list").arg(&path));
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["#0  00:02.000  Build started  36.4%", "#1  00:05.000  90.9%"]
    );
}

#[test]
fn list_rejects_invalid_marker() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("list")
        .arg(fixture("invalid_time.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid marker time -1"));
}

#[test]
fn list_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = crate::helpers::write_file(temp.path(), "markers.txt", "[]");
    markers(&temp)
        .arg("list")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported marker file"));
}

#[test]
fn list_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("list")
        .arg(temp.path().join("gone.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ============================================================================
// replay
// ============================================================================

#[test]
fn replay_reports_each_marker_once() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        markers(&temp)
            .arg("replay")
            .arg(fixture("chapters.json"))
            .args(["--tick", "0.25"]),
    );

    insta::assert_snapshot!(stdout.trim_end(), @r"
    00:10.000  reached #1 at 00:10.000  Intro
    00:30.000  reached #2 at 00:30.000  Middle
    00:45.000  reached #0 at 00:45.000  Outro
    3 marker(s) reached
    ");
}

#[test]
fn replay_seek_back_rearms_markers() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        markers(&temp)
            .arg("replay")
            .arg(fixture("chapters.json"))
            .args(["--tick", "0.25", "--seek", "35=5"]),
    );

    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "00:10.000  reached #1 at 00:10.000  Intro",
            "00:30.000  reached #2 at 00:30.000  Middle",
            "00:35.000  seek -> 00:05.000",
            "00:10.000  reached #1 at 00:10.000  Intro",
            "00:30.000  reached #2 at 00:30.000  Middle",
            "00:45.000  reached #0 at 00:45.000  Outro",
            "5 marker(s) reached",
        ]
    );
}

#[test]
fn replay_seek_forward_skips_markers() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        markers(&temp)
            .arg("replay")
            .arg(fixture("chapters.json"))
            .args(["--tick", "0.25", "--seek", "5=40"]),
    );

    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "00:05.000  seek -> 00:40.000",
            "00:45.000  reached #0 at 00:45.000  Outro",
            "1 marker(s) reached",
        ]
    );
}

#[test]
fn replay_uses_tick_from_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[replay]\ntick = 0.5\n").unwrap();
    let stdout = stdout_of(
        markers(&temp)
            .arg("replay")
            .arg(fixture("bare_list.json"))
            .args(["--duration", "3"]),
    );

    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "00:01.000  reached #1 at 00:01.000",
            "00:02.500  reached #0 at 00:02.500  second",
            "2 marker(s) reached",
        ]
    );
}

#[test]
fn replay_without_duration_fails() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("replay")
        .arg(fixture("bare_list.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--duration"));
}

#[test]
fn replay_rejects_malformed_seek() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .arg("replay")
        .arg(fixture("chapters.json"))
        .args(["--seek", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected AT=TO"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[tracker]"))
        .stdout(predicate::str::contains("epsilon = 0.001"))
        .stdout(predicate::str::contains("tick = 0.25"));
}

#[test]
fn config_migrate_non_interactive_makes_no_changes() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("use --yes"))
        .stdout(predicate::str::contains("No changes made."));
    assert!(!temp.path().join("config.toml").exists());
}

#[test]
fn config_migrate_yes_creates_then_is_up_to_date() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file created successfully."));

    let content = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
    let config: markers::Config = toml::from_str(&content).unwrap();
    assert_eq!(config, markers::Config::default());

    markers(&temp)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is already up to date."));
}

#[test]
fn config_migrate_keeps_user_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "# mine\n[tracker]\nepsilon = 0.01\n").unwrap();

    markers(&temp)
        .args(["config", "migrate", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 missing field(s) in 1 new section(s):"))
        .stdout(predicate::str::contains("Config updated successfully."))
        .stdout(predicate::str::contains("\x1b[").not());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("# mine"));
    assert!(content.contains("epsilon = 0.01"));
    assert!(content.contains("tick = 0.25"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    markers(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_markers"));
}
