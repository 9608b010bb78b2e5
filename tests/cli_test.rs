//! Binary behaviour that needs no git repository.

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("contribution-graph").expect("binary built");
    // keep a user's config file out of the tests
    cmd.args(["--config", concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/settings.toml")]);
    cmd
}

#[test]
fn test_preview_prints_drawing_and_summary() {
    bin()
        .args(["--text", "HI", "--startdate", "2024-01-03", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("█"))
        .stdout(predicate::str::contains("starting date Sun Dec 31 2023"));
}

#[test]
fn test_unsupported_character_shows_charset() {
    bin()
        .args(["--text", "A~", "--preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'~' character not supported"))
        .stderr(predicate::str::contains("Charset:"));
}

#[test]
fn test_missing_text_is_an_error() {
    bin()
        .args(["--preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Option --text required"));
}

#[test]
fn test_bad_start_date() {
    bin()
        .args(["--text", "HI", "--startdate", "someday", "--preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start date"));
}

#[test]
fn test_unrepresentable_start_date_fails_cleanly() {
    bin()
        .args(["--text", "HI", "--startdate", "+262142-12-25", "--preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start date"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_push_without_origin_only_warns() {
    bin()
        .args(["--text", "HI", "--push", "--preview"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Option --origin required"));
}

#[test]
fn test_custom_font() {
    bin()
        .args([
            "--font",
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dots.json"),
            "--text",
            "o o",
            "--startdate",
            "2024-01-03",
            "--preview",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("preview (4 commits)"));
}
