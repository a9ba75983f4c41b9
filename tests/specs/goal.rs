//! Specs for `goalsplice goal`.

use crate::prelude::*;

/// > A goal without progress gets the default fields appended in order
#[test]
fn goal_without_progress_is_byte_exact() {
    goalsplice("goal")
        .args(&["login-1"])
        .with_fixture_definitions()
        .passes()
        .stdout_eq(concat!(
            r#"{"goalId":"login-1","name":"Show up","description":"","type":"daily","#,
            r#""eventSource":"login","requirement":{"statCode":"login","operator":">=","targetValue":1},"#,
            r#""reward":{"type":"WALLET","rewardId":"gold","quantity":50},"prerequisites":[],"#,
            r#""progress":0,"status":"not_started","completedAt":"","claimedAt":""}"#,
            "\n"
        ));
}

/// > A goal with progress carries the record's values
#[test]
fn goal_with_progress() {
    let v = goalsplice("goal")
        .args(&["win-5"])
        .with_fixture_definitions()
        .with_fixture_progress()
        .passes()
        .json();

    assert_eq!(v["goalId"], "win-5");
    assert_eq!(v["progress"], 5);
    assert_eq!(v["status"], "claimed");
    assert_eq!(v["claimedAt"], "2025-01-16T08:00:00Z");
    assert_eq!(v["prerequisites"][0], "kill-10");
}

/// > An unknown goal exits 1
#[test]
fn unknown_goal_exits_1() {
    goalsplice("goal")
        .args(&["nope"])
        .with_fixture_definitions()
        .exits(1)
        .stderr_has("goal not found: nope");
}
