use assert_cmd::Command;
use predicates::prelude::*;

fn fbscan() -> Command {
    Command::cargo_bin("fbscan").unwrap()
}

#[test]
fn no_arguments_prints_usage() {
    fbscan()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--api"))
        .stdout(predicate::str::contains("Checking restrictions").not());
}

#[test]
fn empty_key_prints_usage() {
    fbscan()
        .args(["--api", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Checking restrictions").not());
}

#[test]
fn project_prints_database_url() {
    fbscan()
        .args(["--project", "demo"])
        .assert()
        .success()
        .stdout("https://demo.firebase.com/.json\n");
}

#[test]
fn help_lists_flags() {
    fbscan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--project"))
        .stdout(predicate::str::contains("--post"))
        .stdout(predicate::str::contains("http://www.google.com"));
}

#[test]
fn single_dash_post_is_not_read_as_project() {
    fbscan()
        .arg("-post")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://ost.firebase.com").not())
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn single_dash_long_flags_are_accepted() {
    fbscan()
        .args(["-url", "http://x", "-project", "demo"])
        .assert()
        .success()
        .stdout("https://demo.firebase.com/.json\n");
}

#[test]
fn single_dash_empty_key_prints_usage() {
    fbscan()
        .args(["-api", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_body_format_is_rejected() {
    fbscan()
        .args(["--body", "yaml", "--project", "demo"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
