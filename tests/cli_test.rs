//! Binary-level tests for the idmsim CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn idmsim() -> Command {
    Command::cargo_bin("idmsim").expect("binary built")
}

#[test]
fn help_lists_all_commands() {
    idmsim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("visualize"))
        .stdout(predicate::str::contains("setup"));
}

#[test]
fn simulate_writes_the_trace_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("trace.csv");

    idmsim()
        .current_dir(dir.path())
        .args([
            "simulate",
            "--num-vehicles",
            "3",
            "--sim-time",
            "5",
            "--dt",
            "0.1",
            "--road-length",
            "400",
            "--distribution",
            "uniform",
            "--speed-min",
            "10",
            "--speed-max",
            "15",
            "--seed",
            "7",
            "--output",
        ])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation finished"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("time,id,x,y,v,a,mass"));
    // 50 steps, 3 vehicles, plus the header
    assert_eq!(contents.lines().count(), 1 + 50 * 3);
}

#[test]
fn simulate_reads_settings_from_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("idmsim.toml"),
        r#"
            [simulation]
            num_vehicles = 2
            sim_time = 2.0
            dt = 0.5
            road_length = 200.0
            distribution = "uniform"
            speed_min = 10.0
            speed_max = 10.0
            seed = 3
        "#,
    )
    .unwrap();

    idmsim()
        .current_dir(dir.path())
        .args(["simulate"])
        .assert()
        .success();

    let trace = dir.path().join("data").join("simulation_output.csv");
    assert!(trace.exists());
}

#[test]
fn simulate_without_settings_names_the_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    idmsim()
        .current_dir(dir.path())
        .args(["simulate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("num_vehicles"));
}

#[test]
fn setup_fails_without_conda_on_the_path() {
    let dir = tempfile::tempdir().unwrap();
    idmsim()
        .current_dir(dir.path())
        .env("PATH", "")
        .args(["setup", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "check that conda is installed and on PATH",
        ));
}

#[test]
fn rejects_an_unknown_distribution() {
    let dir = tempfile::tempdir().unwrap();
    idmsim()
        .current_dir(dir.path())
        .args(["simulate", "--distribution", "gamma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gamma"));
}
