use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn show_default_chain() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "joint 0: offset (0.000, -10.000, 0.000) position (0.000, -10.000, -30.000)",
        ))
        .stdout(predicate::str::contains("joint 4:"))
        .stdout(predicate::str::contains("joint 5:").not());
}

#[test]
fn show_with_overrides() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["show", "--segments", "2", "--segment-length", "1.5", "--anchor", "1", "-2", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "joint 2: offset (0.000, 1.500, 0.000) position (1.000, -0.500, 0.000)",
        ));
}

#[test]
fn drag_command() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["--anchor", "0", "0", "0", "drag", "2", "10", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dragged joint 2 to (10.000, 0.000, 0.000)"))
        .stdout(predicate::str::contains(
            "joint 1: offset (0.000, 5.000, 0.000) position (0.000, -5.000, 0.000)",
        ))
        .stdout(predicate::str::contains("position (10.000, 10.000, 0.000)"));
}

#[test]
fn drag_with_overlapping_handles() {
    // unit segments make neighbouring 2-high handle boxes overlap
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args([
            "--segment-length",
            "1",
            "--anchor",
            "0",
            "0",
            "0",
            "drag",
            "2",
            "10",
            "0",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dragged joint 2 to (10.000, 0.000, 0.000)"))
        .stdout(predicate::str::contains(
            "joint 1: offset (0.000, 1.000, 0.000) position (0.000, -1.000, 0.000)",
        ))
        .stdout(predicate::str::contains(
            "joint 2: offset (10.000, 1.000, 0.000) position (10.000, 0.000, 0.000)",
        ))
        .stdout(predicate::str::contains("position (10.000, 2.000, 0.000)"))
        .stdout(predicate::str::contains("Could not grab").not());
}

#[test]
fn drag_out_of_range_fails() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["drag", "9", "0", "0", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index 9 out of range"));
}

#[test]
fn pick_command() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["pick", "0", "5", "0", "0", "0", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Picked joint 3 at distance 26.500"));

    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["pick", "50", "0", "0", "0", "0", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No handle hit"));
}

#[test]
fn invalid_config_is_rejected() {
    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["show", "--segments", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("segment count"));
}

#[test]
fn config_file() {
    let file = assert_fs::NamedTempFile::new("chain.json").unwrap();
    file.write_str(r#"{"segment_count": 3, "segment_length": 2.0, "anchor": {"x": 0, "y": 0, "z": 0}}"#)
        .unwrap();

    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args(["show", "--config", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "joint 3: offset (0.000, 2.000, 0.000) position (0.000, 3.000, 0.000)",
        ));
}

#[test]
fn replay_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let script = dir.child("script.json");
    script
        .write_str(
            r#"{"frames": [
                [{"source": 1, "event": {"type": "begin_drag",
                    "ray": {"origin": {"x": 0, "y": 10, "z": 0}, "direction": {"x": 0, "y": 0, "z": -1}}}}],
                [{"source": 1, "event": {"type": "move_drag", "target": {"x": 4, "y": 10, "z": -30}}}]
            ]}"#,
        )
        .unwrap();
    let output = dir.child("snapshot.json");

    Command::cargo_bin("chain_drag_cli")
        .unwrap()
        .args([
            "replay",
            script.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote snapshot after 2 frames"));

    output.assert(predicate::str::contains("\"visual_state\": \"held\""));
    output.assert(predicate::str::contains("\"selected_by\": 1"));
    dir.close().unwrap();
}
