#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
#![allow(missing_docs)] // integration test crate; no public API to document

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write the standard test document and return the temp dir and file path.
fn test_document() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(
        &path,
        r#"{
    "meta": {
        "id": "7c4e1f0a-8a2b-4c3d-9e5f-012345678901",
        "name": "Test Collection",
        "schemaVersion": 1,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    },
    "tables": [
        {
            "id": "weapons",
            "name": "Weapons",
            "tags": ["martial"],
            "type": "simple",
            "entries": [
                {"id": "a", "value": "Sword", "weight": 3, "description": "A fine blade"},
                {"id": "b", "value": "Shield"}
            ]
        },
        {
            "id": "armor",
            "name": "Armor",
            "type": "simple",
            "entries": [{"id": "c", "value": "Chainmail"}]
        },
        {
            "id": "single",
            "name": "Single",
            "type": "simple",
            "entries": [{"id": "only", "value": "Lantern"}]
        },
        {
            "id": "fancy-weapons",
            "name": "Fancy Weapons",
            "extends": "weapons",
            "type": "simple",
            "entries": [{"id": "a", "value": "Gilded Sword"}]
        },
        {
            "id": "loot",
            "name": "Loot",
            "type": "composite",
            "sources": [
                {"tableId": "weapons", "weight": 2},
                {"tableId": "armor"}
            ]
        },
        {
            "id": "gear",
            "name": "Gear",
            "type": "collection",
            "members": ["weapons", "armor"]
        },
        {
            "id": "secret",
            "name": "Secret",
            "hidden": true,
            "type": "simple",
            "entries": [{"id": "s", "value": "Skeleton key"}]
        }
    ],
    "templates": [
        {
            "id": "find",
            "name": "Find",
            "text": "You find a {{loot}}.",
            "resultType": "hook"
        }
    ]
}
"#,
    )
    .unwrap();
    (dir, path)
}

fn tw() -> Command {
    Command::cargo_bin("tw").unwrap()
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_prints_the_rolled_value() {
    let (_dir, path) = test_document();
    tw().args(["roll", "single", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lantern"));
}

#[test]
fn roll_unknown_table_fails() {
    let (_dir, path) = test_document();
    tw().args(["roll", "nothing-here", "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown reference"));
}

#[test]
fn roll_is_deterministic_with_a_seed() {
    let (_dir, path) = test_document();
    let first = tw()
        .args(["roll", "loot", "-f", path.to_str().unwrap(), "--seed", "7", "-n", "5"])
        .output()
        .unwrap();
    let second = tw()
        .args(["roll", "loot", "-f", path.to_str().unwrap(), "--seed", "7", "-n", "5"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_count_repeats() {
    let (_dir, path) = test_document();
    tw().args(["roll", "single", "-f", path.to_str().unwrap(), "-n", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Roll 3")
                .and(predicate::str::contains("Lantern").count(3)),
        );
}

#[test]
fn roll_with_trace_prints_the_tree() {
    let (_dir, path) = test_document();
    tw().args([
        "roll",
        "loot",
        "-f",
        path.to_str().unwrap(),
        "--seed",
        "1",
        "--trace",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Trace").and(predicate::str::contains("Loot (loot)")));
}

#[test]
fn roll_attributes_composite_and_source_table() {
    let (_dir, path) = test_document();
    tw().args(["roll", "loot", "-f", path.to_str().unwrap(), "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("via Loot"));
}

// ---------------------------------------------------------------------------
// template
// ---------------------------------------------------------------------------

#[test]
fn template_expands_references() {
    let (_dir, path) = test_document();
    tw().args(["template", "find", "-f", path.to_str().unwrap(), "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You find a ").and(predicate::str::contains("[hook]")));
}

#[test]
fn template_unknown_id_fails() {
    let (_dir, path) = test_document();
    tw().args(["template", "missing", "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown reference"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_tables_and_templates() {
    let (_dir, path) = test_document();
    tw().args(["list", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("weapons")
                .and(predicate::str::contains("composite"))
                .and(predicate::str::contains("find"))
                .and(predicate::str::contains("templates")),
        );
}

#[test]
fn list_hides_hidden_tables_by_default() {
    let (_dir, path) = test_document();
    tw().args(["list", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret").not());

    tw().args(["list", "-f", path.to_str().unwrap(), "--hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret"));
}

#[test]
fn list_filters_by_tag() {
    let (_dir, path) = test_document();
    tw().args(["list", "-f", path.to_str().unwrap(), "--tag", "martial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weapons").and(predicate::str::contains("armor").not()));
}

// ---------------------------------------------------------------------------
// show / stats / chain
// ---------------------------------------------------------------------------

#[test]
fn show_prints_entries_with_weights() {
    let (_dir, path) = test_document();
    tw().args(["show", "weapons", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Weapons")
                .and(predicate::str::contains("Sword"))
                .and(predicate::str::contains("2 entries")),
        );
}

#[test]
fn stats_prints_selection_percentages() {
    let (_dir, path) = test_document();
    tw().args(["stats", "weapons", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("75.0%").and(predicate::str::contains("25.0%")));
}

#[test]
fn stats_on_composite_uses_source_weights() {
    let (_dir, path) = test_document();
    tw().args(["stats", "loot", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("66.7%").and(predicate::str::contains("33.3%")));
}

#[test]
fn chain_walks_parent_tables() {
    let (_dir, path) = test_document();
    tw().args(["chain", "fancy-weapons", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Fancy Weapons").and(predicate::str::contains("(weapons)")),
        );
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_on_a_clean_document() {
    let (_dir, path) = test_document();
    tw().args(["check", "-f", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn check_reports_dangling_references() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{
    "meta": {
        "id": "9a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9",
        "name": "Broken",
        "schemaVersion": 1,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    },
    "tables": [
        {
            "id": "orphan",
            "name": "Orphan",
            "extends": "ghost",
            "type": "simple",
            "entries": [{"id": "a", "value": "x"}]
        }
    ],
    "templates": []
}
"#,
    )
    .unwrap();

    tw().args(["check", "-f", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extends unknown table \"ghost\""));
}

// ---------------------------------------------------------------------------
// collections
// ---------------------------------------------------------------------------

#[test]
fn multiple_collections_need_an_explicit_choice() {
    let (_dir, path) = test_document();
    let dir2 = TempDir::new().unwrap();
    let path2 = dir2.path().join("homebrew.json");
    fs::write(
        &path2,
        r#"{
    "meta": {
        "id": "0b1c2d3e-4f50-6172-8394-a5b6c7d8e9f0",
        "name": "Homebrew",
        "schemaVersion": 1,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    },
    "tables": [
        {
            "id": "potions",
            "name": "Potions",
            "type": "simple",
            "entries": [{"id": "p", "value": "Healing draught"}]
        }
    ],
    "templates": []
}
"#,
    )
    .unwrap();

    tw().args([
        "roll",
        "potions",
        "-f",
        path.to_str().unwrap(),
        "-f",
        path2.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("multiple collections"));

    tw().args([
        "roll",
        "potions",
        "-f",
        path.to_str().unwrap(),
        "-f",
        path2.to_str().unwrap(),
        "-c",
        "homebrew",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Healing draught"));
}
