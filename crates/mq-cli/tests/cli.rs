//! Integration tests for the `mq` command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mq() -> Command {
    Command::cargo_bin("mq").unwrap()
}

/// Write the built-in catalog into a temp directory and return its path.
fn exported_catalog(dir: &TempDir) -> String {
    let path = dir.path().join("catalog.json");
    mq().args(["catalog", "-o", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote catalog"));
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_with_cheat_survives() {
    mq().args(["simulate", "--seed", "7", "--cheat"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Masquerade")
                .and(predicate::str::contains("15 rounds played"))
                .and(predicate::str::contains("won")),
        );
}

#[test]
fn simulate_reveal_shows_target() {
    mq().args(["simulate", "-d", "hard", "--cheat", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(target)").and(predicate::str::contains("Influence")));
}

#[test]
fn simulate_verbose_lists_rounds() {
    mq().args(["simulate", "-d", "easy", "--cheat", "-v"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Event Log")
                .and(predicate::str::contains("Round 1 begins."))
                .and(predicate::str::contains("You won!")),
        );
}

#[test]
fn simulate_json_is_parseable() {
    let output = mq()
        .args(["simulate", "--seed", "3", "--cheat", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let events = events.as_array().unwrap();
    assert!(events.len() > 15);
    assert!(events[0]["kind"].get("GameStarted").is_some());
}

#[test]
fn simulate_is_reproducible() {
    let run = || {
        mq().args(["simulate", "--seed", "99", "--json"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn simulate_rejects_unknown_difficulty() {
    mq().args(["simulate", "-d", "nightmare"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn simulate_fails_on_small_catalog() {
    let dir = TempDir::new().unwrap();
    let path = exported_catalog(&dir);
    let mut catalog: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    catalog["roles"]["roles"]
        .as_array_mut()
        .unwrap()
        .truncate(3);
    fs::write(&path, catalog.to_string()).unwrap();

    mq().args(["simulate", "--catalog", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game setup failed"));
}

// ---------------------------------------------------------------------------
// roles / rooms / catalog
// ---------------------------------------------------------------------------

#[test]
fn roles_lists_catalog() {
    mq().arg("roles")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Princess")
                .and(predicate::str::contains("always lies"))
                .and(predicate::str::contains("10 roles")),
        );
}

#[test]
fn roles_reads_exported_catalog() {
    let dir = TempDir::new().unwrap();
    let path = exported_catalog(&dir);
    mq().args(["roles", "--catalog", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 roles"));
}

#[test]
fn roles_rejects_invalid_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "this is not json").unwrap();
    mq().args(["roles", "--catalog", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid catalog"));
}

#[test]
fn rooms_shows_layout() {
    mq().arg("rooms")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ballroom")
                .and(predicate::str::contains("blind spot"))
                .and(predicate::str::contains("Home room:")),
        );
}

#[test]
fn catalog_prints_json() {
    mq().arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"roles\"").and(predicate::str::contains("\"layout\"")));
}
