//! End-to-end CLI tests.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use predicates::prelude::*;
use tempfile::TempDir;

const DIRECTORY_YAML: &str = r#"
salons:
  - id: 1
    name: Cut & Color Ginza
    hours:
      monday: { start: "09:00", end: "18:00" }
      tuesday: { start: "09:00", end: "18:00" }
      wednesday: { start: "09:00", end: "18:00" }
      thursday: { start: "09:00", end: "18:00" }
      friday: { start: "09:00", end: "18:00" }
      saturday: { start: "09:00", end: "18:00" }
menus:
  - id: 10
    salon_id: 1
    name: Cut
    duration_minutes: 30
    price: 4500
"#;

struct TestEnv {
    _temp: TempDir,
    data_dir: String,
    directory: String,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        let directory = temp.path().join("directory.yaml");
        fs::write(&directory, DIRECTORY_YAML).unwrap();
        Self {
            data_dir: data_dir.to_str().unwrap().to_string(),
            directory: directory.to_str().unwrap().to_string(),
            _temp: temp,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("yoyaku").unwrap();
        cmd.args(["--data-dir", &self.data_dir, "--directory", &self.directory]);
        cmd
    }
}

fn next_monday() -> String {
    let mut date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .unwrap();
    while date.weekday() != Weekday::Mon {
        date = date.succ_opt().unwrap();
    }
    date.to_string()
}

fn next_sunday() -> String {
    let monday = NaiveDate::parse_from_str(&next_monday(), "%Y-%m-%d").unwrap();
    monday.checked_add_days(Days::new(6)).unwrap().to_string()
}

#[test]
fn test_help_runs() {
    Command::cargo_bin("yoyaku")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("salon booking"));
}

#[test]
fn test_init_creates_database() {
    let env = TestEnv::new();
    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(Path::new(&env.data_dir).join("yoyaku.db").exists());
}

#[test]
fn test_show_data_dir() {
    let env = TestEnv::new();
    env.cmd()
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains(&env.data_dir));
}

#[test]
fn test_slots_lists_full_grid() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["slots", "--salon", "1", "--date", &next_monday(), "--menu", "10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let slots: Vec<&str> = stdout.lines().collect();
    assert_eq!(slots.len(), 18);
    assert_eq!(slots.first(), Some(&"09:00"));
    assert_eq!(slots.last(), Some(&"17:30"));
}

#[test]
fn test_slots_requires_directory_file() {
    let temp = TempDir::new().unwrap();
    let output = Command::cargo_bin("yoyaku")
        .unwrap()
        .env_remove("YOYAKU_DIRECTORY")
        .args(["--data-dir", temp.path().to_str().unwrap()])
        .args(["slots", "--salon", "1", "--date", "2029-01-01", "--menu", "10"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_booking_flow() {
    let env = TestEnv::new();
    let date = next_monday();

    // Book 10:00 as user 12
    env.cmd()
        .args(["book", "--salon", "1", "--date", &date, "--time", "10:00"])
        .args(["--menu", "10", "--user", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00").and(predicate::str::contains("requested")));

    // The slot is no longer offered
    let output = env
        .cmd()
        .args(["slots", "--salon", "1", "--date", &date, "--menu", "10"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 17);
    assert!(!stdout.lines().any(|line| line == "10:00"));

    // A second booking for the same slot loses
    env.cmd()
        .args(["book", "--salon", "1", "--date", &date, "--time", "10:00"])
        .args(["--menu", "10", "--user", "34"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("slot no longer available"));
}

#[test]
fn test_lifecycle_commands() {
    let env = TestEnv::new();
    let date = next_monday();

    let output = env
        .cmd()
        .args(["book", "--salon", "1", "--date", &date, "--time", "11:00"])
        .args(["--menu", "10", "--user", "12", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let booked: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("book --output json emits JSON");
    let id = booked["id"].as_i64().unwrap().to_string();

    // Operator confirms
    env.cmd()
        .args(["confirm", &id, "--salon", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirmed"));

    // Completing a future slot is rejected as an invalid transition
    env.cmd()
        .args(["complete", &id, "--salon", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid transition"));

    // Operator listing shows the confirmed booking
    env.cmd()
        .args(["list", "--salon", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirmed").and(predicate::str::contains("11:00")));

    // The user cancels; a repeat cancel is a no-op success
    env.cmd()
        .args(["cancel", &id, "--user", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    env.cmd()
        .args(["cancel", &id, "--user", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already cancelled"));

    // Legacy purge removes the record entirely
    env.cmd()
        .args(["cancel", &id, "--user", "12", "--purge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    env.cmd()
        .args(["cancel", &id, "--user", "12", "--purge"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_booking_closed_day_fails_validation() {
    let env = TestEnv::new();
    env.cmd()
        .args(["book", "--salon", "1", "--date", &next_sunday(), "--time", "10:00"])
        .args(["--menu", "10", "--user", "12"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("validation error"));
}

#[test]
fn test_cancel_requires_exactly_one_principal() {
    let env = TestEnv::new();
    env.cmd()
        .args(["cancel", "1"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_list_unknown_salon_is_empty() {
    let env = TestEnv::new();
    env.cmd().arg("init").assert().success();
    env.cmd()
        .args(["list", "--salon", "42"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
