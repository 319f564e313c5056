//! End-to-end tests for the `geojson-splitter` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn splitter() -> Command {
    Command::cargo_bin("geojson-splitter").unwrap()
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn splits_default_input_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("export.geojson"),
        r#"{"type":"FeatureCollection","features":[{"id":"A"},{"id":"B"},{"id":"C"}]}"#,
    )
    .unwrap();

    splitter()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GeoJSON split successfully: export_part1.geojson, export_part2.geojson",
        ));

    assert_eq!(
        read_json(&dir.path().join("export_part1.geojson")),
        json!({ "type": "FeatureCollection", "features": [{ "id": "A" }] })
    );
    assert_eq!(
        read_json(&dir.path().join("export_part2.geojson")),
        json!({ "type": "FeatureCollection", "features": [{ "id": "B" }, { "id": "C" }] })
    );
}

#[test]
fn missing_features_key_prints_message_and_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("export.geojson");
    fs::write(&input, r#"{"type":"X"}"#).unwrap();

    splitter()
        .arg(&input)
        .assert()
        .success()
        .stdout("Invalid GeoJSON file: Missing 'features' key.\n");

    assert!(!dir.path().join("export_part1.geojson").exists());
    assert!(!dir.path().join("export_part2.geojson").exists());
}

#[test]
fn logs_stay_off_stdout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("export.geojson"), r#"{"features":[{"id":1}]}"#).unwrap();

    splitter()
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stdout("GeoJSON split successfully: export_part1.geojson, export_part2.geojson\n")
        .stderr(predicate::str::contains("Loading file"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();

    splitter()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.geojson");
    fs::write(&input, "{ not json").unwrap();

    splitter()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn output_dir_and_prefix_are_honoured() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let input = dir.path().join("roads.geojson");
    fs::write(&input, r#"{"features":[{"id":1},{"id":2}]}"#).unwrap();

    splitter()
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .args(["--prefix", "roads"])
        .assert()
        .success();

    assert_eq!(
        read_json(&out.join("roads_part1.geojson")),
        json!({ "type": "FeatureCollection", "features": [{ "id": 1 }] })
    );
    assert_eq!(
        read_json(&out.join("roads_part2.geojson")),
        json!({ "type": "FeatureCollection", "features": [{ "id": 2 }] })
    );
    assert!(!dir.path().join("export_part1.geojson").exists());
}
