use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn cli() -> Command {
    cargo_bin_cmd!("roadtrip")
}

fn prepare_data_dir() -> TempDir {
    let temp = tempdir().expect("create temp dir");
    fs::write(
        temp.path().join("road-segments.txt"),
        "Alpha Beta 10 50 Hwy1\n\
         Beta Gamma 5 30 Hwy2\n\
         Alpha Gamma 20 60 Hwy3\n\
         Delta Echo 4 35 Byway9\n",
    )
    .expect("write segments");
    fs::write(
        temp.path().join("city-gps.txt"),
        "Alpha 40.0 -86.0\n\
         Beta 40.1 -86.0\n\
         Gamma 40.15 -86.0\n\
         Delta 41.0 -86.0\n\
         Echo 41.05 -86.0\n",
    )
    .expect("write gps");
    temp
}

fn route_args(cmd: &mut Command, temp: &TempDir, from: &str, to: &str, mode: &str) {
    cmd.env("RUST_LOG", "error")
        .arg("--data-dir")
        .arg(temp.path())
        .arg("route")
        .arg("--from")
        .arg(from)
        .arg("--to")
        .arg(to)
        .arg("--mode")
        .arg(mode);
}

#[test]
fn distance_route_prints_classic_layout() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "distance");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Start in Alpha"))
        .stdout(predicate::str::contains(
            "Then go to Beta via Hwy1 for 10 miles",
        ))
        .stdout(predicate::str::contains(
            "Then go to Gamma via Hwy2 for 5 miles",
        ))
        .stdout(predicate::str::contains("Total segments:    2"))
        .stdout(predicate::str::contains("Total miles:   15.000"));
}

#[test]
fn segments_route_takes_direct_road() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "segments");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Then go to Gamma via Hwy3 for 20 miles",
        ))
        .stdout(predicate::str::contains("Total segments:    1"));
}

#[test]
fn json_format_uses_contract_field_names() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    cmd.arg("--format").arg("json");
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "distance");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total-segments\": 2"))
        .stdout(predicate::str::contains("\"total-miles\": 15.0"))
        .stdout(predicate::str::contains("\"route-taken\""));
}

#[test]
fn compact_format_joins_stops() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    cmd.arg("--format").arg("compact");
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "distance");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Alpha -> Beta -> Gamma"));
}

#[test]
fn invalid_mode_is_rejected_before_loading() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "fastest");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid cost mode: fastest"));
}

#[test]
fn unknown_location_error_is_friendly() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpa", "Gamma", "distance");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown location 'Alpa'"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn unreachable_goal_reports_no_route() {
    let temp = prepare_data_dir();
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpha", "Echo", "time");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between Alpha and Echo",
        ));
}

#[test]
fn missing_data_dir_reports_load_failure() {
    let temp = tempdir().expect("create temp dir");
    let mut cmd = cli();
    route_args(&mut cmd, &temp, "Alpha", "Gamma", "distance");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load road network"));
}
