//! Specs for `goalsplice stats` and `goalsplice snapshot`.

use crate::prelude::*;

/// > stats reports document counts
#[test]
fn stats_text() {
    goalsplice("stats")
        .with_fixture_definitions()
        .passes()
        .stdout_has("challenges: 3")
        .stdout_has("goals: 3")
        .stdout_has("bytes: ");
}

/// > stats -o json emits the counts as JSON
#[test]
fn stats_json() {
    let v = goalsplice("stats")
        .args(&["-o", "json"])
        .with_fixture_definitions()
        .passes()
        .json();

    assert_eq!(v["challenges"], 3);
    assert_eq!(v["goals"], 3);
    assert!(v["total_bytes"].as_u64().unwrap() > 0);
}

/// > A snapshot renders the same bytes as the definitions it came from
#[test]
fn snapshot_round_trip() {
    let project = Project::empty();
    let snapshot = project.path().join("out/cache.bin");
    let snapshot = snapshot.to_str().unwrap();

    goalsplice("snapshot")
        .args(&[snapshot])
        .with_fixture_definitions()
        .passes()
        .stderr_has("wrote 3 challenges (3 goals)");

    let from_definitions = goalsplice("render")
        .args(&["daily", "weekly", "empty"])
        .with_fixture_definitions()
        .with_fixture_progress()
        .passes()
        .stdout();

    goalsplice("render")
        .args(&["daily", "weekly", "empty", "--snapshot", snapshot])
        .with_fixture_progress()
        .passes()
        .stdout_eq(&from_definitions);
}

/// > A corrupt snapshot is rejected
#[test]
fn corrupt_snapshot_exits_3() {
    let project = Project::empty();
    project.file("cache.bin", "garbage");
    let snapshot = project.path().join("cache.bin");

    goalsplice("stats")
        .args(&["--snapshot", snapshot.to_str().unwrap()])
        .exits(3)
        .stderr_has("snapshot error");
}

/// > snapshot without definitions is an argument error
#[test]
fn snapshot_without_definitions_exits_2() {
    let project = Project::empty();
    goalsplice("snapshot")
        .args(&["cache.bin"])
        .pwd(project.path())
        .exits(2)
        .stderr_has("no definitions");
}

/// > --definitions and --snapshot conflict
#[test]
fn definitions_conflict_with_snapshot() {
    goalsplice_cmd()
        .args(["stats", "--definitions", "a.json", "--snapshot", "b.bin"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot be used with"));
}
