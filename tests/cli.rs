#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("slotmatch-cli").unwrap()
}

#[test]
fn assign_then_lookup() {
    let dir = tempdir().unwrap();
    let emails = dir.path().join("ems.txt");
    let prefs = dir.path().join("prefs.txt");
    let mapping = dir.path().join("quals.json");
    fs::write(&emails, "a@ucsd.edu\nb@ucsd.edu\n").unwrap();
    fs::write(&prefs, "Mon (5/2) 2:00 PM, Tue (5/3) 2:00 PM\nTue (5/3) 2:40 PM\n").unwrap();

    cli()
        .arg("--mapping")
        .arg(&mapping)
        .arg("assign")
        .arg("--emails")
        .arg(&emails)
        .arg("--prefs")
        .arg(&prefs)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 assigned, 0 unassigned"))
        .stderr(predicate::str::contains("(5/3) @ 2:40 -- APM 7218 -- b@ucsd.edu"));

    cli()
        .arg("--mapping")
        .arg(&mapping)
        .args(["lookup", "--email", "a@ucsd.edu"])
        .assert()
        .success()
        .stdout("a@ucsd.edu -- (5/2) @ 2:00\n");

    cli()
        .arg("--mapping")
        .arg(&mapping)
        .args(["lookup", "--email", "z@ucsd.edu"])
        .assert()
        .code(2);
}

#[test]
fn unassigned_people_exit_with_warning_code() {
    let dir = tempdir().unwrap();
    let slots = dir.path().join("slots.json");
    let csv = dir.path().join("requests.csv");
    let mapping = dir.path().join("quals.json");
    fs::write(&slots, r#"{"slots":[{"code":220,"capacity":1}]}"#).unwrap();
    fs::write(
        &csv,
        "email,preferences\na@x,\"Mon (2) 2:00\"\nb@x,\"Mon (2) 2:00\"\n",
    )
    .unwrap();

    cli()
        .arg("--mapping")
        .arg(&mapping)
        .arg("--table")
        .arg(&slots)
        .arg("assign")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NONE -- b@x"));

    let saved = fs::read_to_string(&mapping).unwrap();
    assert!(saved.contains("\"a@x\": \"(2) @ 2:00\""));
    assert!(!saved.contains("b@x"));
}

#[test]
fn malformed_preferences_fail_the_run() {
    let dir = tempdir().unwrap();
    let emails = dir.path().join("ems.txt");
    let prefs = dir.path().join("prefs.txt");
    fs::write(&emails, "a@ucsd.edu\n").unwrap();
    fs::write(&prefs, "Mon (5/2) 2:00 PM, sometime\n").unwrap();

    cli()
        .arg("--mapping")
        .arg(dir.path().join("quals.json"))
        .arg("assign")
        .arg("--emails")
        .arg(&emails)
        .arg("--prefs")
        .arg(&prefs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("preferences of a@ucsd.edu"));
    assert!(!dir.path().join("quals.json").exists());
}

#[test]
fn lists_default_slots() {
    cli()
        .arg("slots")
        .assert()
        .success()
        .stdout(predicate::str::contains("(5/5) @ 2:40 | 524 | capacity 3"));
}
