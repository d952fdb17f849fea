// ABOUTME: Black-box tests for the newslens binary.
// ABOUTME: Exercises the sentinel failure path and argument handling without any network access.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn malformed_url_fails_with_sentinel_view() {
    // URL parsing fails before any request is made, so this is hermetic.
    Command::cargo_bin("newslens")
        .unwrap()
        .args(["not-a-url", "--extract-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("__ERROR__: "))
        .stderr(predicate::str::contains("본문 수집 실패"));
}

#[test]
fn missing_url_without_tty_is_an_error() {
    Command::cargo_bin("newslens")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL is required"));
}

#[test]
fn help_describes_the_pipeline() {
    Command::cargo_bin("newslens")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--extract-only"));
}
