//! End-to-end tests driving the `fsched` binary.
//!
//! Covers the full flow: init → add → edit → delete → totals → export → load.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn fsched_binary() -> String {
    env!("CARGO_BIN_EXE_fsched").to_string()
}

/// Runs `fsched` against `file`, isolated from the user's config.
fn fsched(home: &Path, file: &Path, args: &[&str]) -> Output {
    Command::new(fsched_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("FSCHED_SCHEDULE_PATH")
        .env_remove("FSCHED_GRANULARITY")
        .env_remove("FSCHED_EXPORT_DIR")
        .env_remove("RUST_LOG")
        .arg("--file")
        .arg(file)
        .args(args)
        .output()
        .expect("failed to run fsched")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "fsched should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// First whitespace-separated token after `Added `, i.e. the short event ID.
fn added_id(line: &str) -> String {
    line.strip_prefix("Added ")
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string()
}

#[test]
fn test_full_schedule_flow() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ada.cccsched");

    let out = stdout(&fsched(
        temp.path(),
        &file,
        &["init", "--name", "Ada Lovelace", "--semester", "Fall 2026"],
    ));
    assert_eq!(out, "Created schedule for Ada Lovelace (Fall 2026)\n");

    let out = stdout(&fsched(
        temp.path(),
        &file,
        &[
            "add", "--type", "teaching", "--day", "mon,wed", "--start", "09:00", "--end", "10:20",
            "--class", "CS 101", "--location", "Hall B",
        ],
    ));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Monday 09:00-10:20 CS 101 (1.50h)"));
    assert!(lines[1].ends_with("Wednesday 09:00-10:20 CS 101 (1.50h)"));
    assert_eq!(lines[2], "Total: 3.00h");
    let wednesday_id = added_id(lines[1]);

    let out = stdout(&fsched(
        temp.path(),
        &file,
        &["add", "--type", "student", "--day", "tue", "--start", "13:00", "--end", "14:00"],
    ));
    let student_id = added_id(out.lines().next().unwrap());

    // Overlap on Monday is rejected and the file is unchanged.
    let before = std::fs::read_to_string(&file).unwrap();
    let output = fsched(
        temp.path(),
        &file,
        &["add", "--type", "campus", "--day", "monday", "--start", "10:00", "--end", "11:00"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("time conflict"), "stderr: {stderr}");
    assert!(stderr.contains("Monday 09:00-10:20 CS 101"));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), before);

    let out = stdout(&fsched(
        temp.path(),
        &file,
        &["edit", &student_id, "--end", "15:30", "--overload"],
    ));
    assert!(out.contains("Tuesday 13:00-15:30 Student Hours (2.50h)"));

    let out = stdout(&fsched(temp.path(), &file, &["delete", &wednesday_id]));
    assert!(out.starts_with(&format!("Deleted {wednesday_id} Wednesday")));

    let totals = read_json(&file)["totals"].clone();
    assert_eq!(totals["teachingHours"].as_f64(), Some(1.5));
    assert_eq!(totals["studentHours"].as_f64(), Some(0.0));
    assert_eq!(totals["overloadHours"].as_f64(), Some(2.5));

    let out = stdout(&fsched(temp.path(), &file, &["totals"]));
    assert!(out.contains("Total Hours                 4.00"));
    assert!(out.contains("Total Minus Overload        1.50"));

    let export_path = temp.path().join("week.tsv");
    let out = stdout(&fsched(
        temp.path(),
        &file,
        &["export", "--output", export_path.to_str().unwrap()],
    ));
    assert!(out.starts_with("Exported workbook to"));
    let tsv = std::fs::read_to_string(&export_path).unwrap();
    assert!(tsv.contains("Overload Hours\t2.50"));
}

#[test]
fn test_load_replaces_and_save_as_copies() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.cccsched");
    let second = temp.path().join("second.cccsched");

    stdout(&fsched(
        temp.path(),
        &first,
        &["init", "--name", "Grace Hopper", "--semester", "Spring 2027"],
    ));
    stdout(&fsched(
        temp.path(),
        &first,
        &["add", "--type", "campus", "--day", "fri", "--start", "08:00", "--end", "09:00"],
    ));
    stdout(&fsched(temp.path(), &first, &["notes", "Committee work"]));

    let out = stdout(&fsched(temp.path(), &first, &["save-as"]));
    let copy = temp.path().join("Grace_Hopper_schedule.cccsched");
    assert_eq!(out, format!("Saved 1 events to {}\n", copy.display()));
    assert_eq!(read_json(&copy), read_json(&first));

    stdout(&fsched(
        temp.path(),
        &second,
        &["init", "--name", "Someone Else", "--semester", "Fall"],
    ));
    let out = stdout(&fsched(temp.path(), &second, &["load", copy.to_str().unwrap()]));
    assert!(out.starts_with("Loaded 1 events for Grace Hopper (Spring 2027)"));

    let out = stdout(&fsched(temp.path(), &second, &["notes"]));
    assert_eq!(out, "Committee work\n");
}

#[test]
fn test_commands_require_init() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("missing.cccsched");

    let output = fsched(temp.path(), &file, &["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("run `fsched init` first"));
    assert!(!file.exists());
}

#[test]
fn test_list_json_is_valid() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("s.cccsched");
    stdout(&fsched(temp.path(), &file, &["init", "--name", "Ada", "--semester", "Fall"]));
    stdout(&fsched(
        temp.path(),
        &file,
        &[
            "add", "--type", "student", "--day", "sat", "--start", "10:00", "--end", "11:00",
            "--temporary", "--counted-hours", "2.5", "--expected-end", "2026-12-11",
        ],
    ));

    let out = stdout(&fsched(temp.path(), &file, &["list", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let event = &value["saturday"][0];
    assert_eq!(event["countedHours"].as_f64(), Some(2.5));
    assert_eq!(event["expectedEndDate"], "2026-12-11");
}
