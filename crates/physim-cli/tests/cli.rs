// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Black-box tests for the `physim` binary.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn physim(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("physim").unwrap();
    cmd.arg("--config-dir").arg(config_dir).env_remove("RUST_LOG");
    cmd
}

fn demo_file(dir: &TempDir, count: usize) -> std::path::PathBuf {
    let out = dir.path().join("scene.bin");
    physim(dir.path())
        .args(["demo", "--count", &count.to_string(), "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("wrote {count} objects")));
    out
}

#[test]
fn demo_then_roundtrip_is_identical() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 3);
    physim(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("objects: 3"))
        .stdout(predicate::str::contains("identical"));
}

#[test]
fn inspect_json_reports_every_object() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 2);
    let output = physim(dir.path())
        .arg("inspect")
        .arg(&file)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let objects = summary["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["offset"], 1);
    assert_eq!(objects[1]["mesh_vertices"], 3);
    assert_eq!(summary["total_words"], fs::metadata(&file).unwrap().len() / 4);
}

#[test]
fn inspect_table_lists_offsets() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 1);
    physim(dir.path())
        .arg("inspect")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("collider v/t"))
        .stdout(predicate::str::contains("1 objects"));
}

#[test]
fn tick_writes_unchanged_scene() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 2);
    let out = dir.path().join("ticked.bin");
    physim(dir.path())
        .args(["tick", "--delta", "-0.5", "--steps", "3", "--out"])
        .arg(&out)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("ticked 2 objects x 3 steps"));
    assert_eq!(fs::read(&out).unwrap(), fs::read(&file).unwrap());
}

#[test]
fn truncated_buffer_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 1);
    let mut bytes = fs::read(&file).unwrap();
    bytes.truncate(bytes.len() - 8);
    fs::write(&file, &bytes).unwrap();

    physim(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode"));
    physim(dir.path())
        .arg("inspect")
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn odd_byte_length_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("odd.bin");
    fs::write(&file, [0u8; 5]).unwrap();
    physim(dir.path())
        .arg("inspect")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a word buffer"));
}

#[test]
fn stored_limits_apply_to_decode() {
    let dir = TempDir::new().unwrap();
    let file = demo_file(&dir, 3);
    fs::write(
        dir.path().join("scene.json"),
        r#"{ "limits": { "max_objects": 2 } }"#,
    )
    .unwrap();
    physim(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .assert()
        .failure();
}
