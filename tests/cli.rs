//! End-to-end tests for the pipulse and fibonacci binaries

use assert_cmd::Command;
use predicates::prelude::*;

fn pipulse() -> Command {
    Command::cargo_bin("pipulse").unwrap()
}

fn fibonacci() -> Command {
    Command::cargo_bin("fibonacci").unwrap()
}

#[test]
fn test_parallel_run_reports_configuration_and_result() {
    pipulse()
        .args(["4", "1000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n (subintervals) = 1000000"))
        .stdout(predicate::str::contains("H (threads)      = 4"))
        .stdout(predicate::str::is_match(r"pi approximation      = 3\.14159\d{15}\n").unwrap())
        .stdout(predicate::str::is_match(r"Parallel time \(s\)     = \d+\.\d{6}\n").unwrap());
}

#[test]
fn test_single_interval() {
    pipulse()
        .args(["3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pi approximation      = 3.200000000000000"));
}

#[test]
fn test_invalid_worker_count_is_coerced_with_warning() {
    pipulse()
        .args(["-3", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H (threads)      = 1"))
        .stderr(predicate::str::contains("invalid worker count"));

    pipulse()
        .args(["abc", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H (threads)      = 1"));
}

#[test]
fn test_invalid_interval_count_is_fatal() {
    for n in ["0", "-5", "2147483648", "ten"] {
        pipulse()
            .args(["4", n])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Usage"))
            .stderr(predicate::str::contains("between 1 and 2147483647"));
    }
}

#[test]
fn test_sequential_mode() {
    pipulse()
        .args(["8", "100000", "--mode", "sequential"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequential time (s)"))
        .stdout(predicate::str::contains("H (threads)").not());
}

#[test]
fn test_json_output() {
    let output = pipulse()
        .args(["2", "1000", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["workers"], 2);
    assert_eq!(value["config"]["intervals"], 1000);
    assert_eq!(value["workers"]["successful"], 2);
    assert_eq!(value["workers"]["per_worker"][1]["start"], 500);
    assert!(value["absolute_error"].as_f64().unwrap() < 1e-6);
}

#[test]
fn test_per_worker_table() {
    pipulse()
        .args(["3", "10", "--per-worker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workers:"))
        .stdout(predicate::str::contains("[0, 4)"))
        .stdout(predicate::str::contains("3 of 3 workers reported"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    pipulse()
        .args(["0", "100", "-q"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_fibonacci_prints_sequence() {
    fibonacci()
        .arg("10")
        .assert()
        .success()
        .stdout("0 1 1 2 3 5 8 13 21 34\n");
}

#[test]
fn test_fibonacci_zero_prints_nothing() {
    fibonacci().arg("0").assert().success().stdout("");
}

#[test]
fn test_fibonacci_rejects_bad_input() {
    fibonacci().assert().failure();
    fibonacci().arg("-1").assert().failure();
    fibonacci().arg("95").assert().failure();
}
