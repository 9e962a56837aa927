use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn recede() -> Command {
    Command::cargo_bin("recede").unwrap()
}

#[test]
fn export_writes_a_loadable_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("pendulum.json");

    recede()
        .args(["export", "--output"])
        .arg(&artifact)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&artifact).unwrap()).unwrap();
    assert_eq!(json["name"], "pendulum_ode");
    assert_eq!(json["dims"]["n"], 20);
    assert_eq!(json["options"]["qp_solver"], "PARTIAL_CONDENSING_HPIPM");
}

#[test]
fn run_prints_trajectories_to_stdout() {
    let output = recede()
        .args(["run", "--steps", "5"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["status"], "complete");
    assert_eq!(report["steps"], 5);
    assert_eq!(report["states"].as_array().unwrap().len(), 6);
    assert_eq!(report["controls"].as_array().unwrap().len(), 5);
    assert_eq!(report["time"].as_array().unwrap().len(), 6);
}

#[test]
fn run_uses_exported_problem_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("pendulum.json");
    let trajectories = dir.path().join("trajectories.json");

    recede()
        .args(["export", "--horizon", "10", "--output"])
        .arg(&artifact)
        .assert()
        .success();

    recede()
        .args(["run", "--steps", "3", "--problem"])
        .arg(&artifact)
        .arg("--output")
        .arg(&trajectories)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&trajectories).unwrap()).unwrap();
    assert_eq!(report["model"], "pendulum_ode");
    assert_eq!(report["dt"], 0.1);
    assert_eq!(report["states"][0][1], std::f64::consts::PI);
}

#[test]
fn settle_stops_a_stabilizing_run_early() {
    let output = recede()
        .args(["run", "--steps", "400", "--settle", "1e6"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["status"], "stopped_by_observer");
    assert_eq!(report["steps"], 5);
}

#[test]
fn missing_problem_file_fails() {
    recede()
        .args(["run", "--problem", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load problem"));
}

#[test]
fn mismatched_gains_fail() {
    recede()
        .args(["run", "--gains=1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gain matrix is 1x2"));
}

#[test]
fn diverging_run_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("pendulum.json");

    recede()
        .args(["export", "--horizon", "1", "--output"])
        .arg(&artifact)
        .assert()
        .success();

    // A one-stage, one-substep horizon over 1 s is too coarse for the swing-up.
    recede()
        .args(["run", "--substeps", "1", "--problem"])
        .arg(&artifact)
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed loop failed"));
}
