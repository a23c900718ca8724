//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn setbench() -> Command {
    Command::cargo_bin("setbench").expect("binary not found")
}

/// Short calibration budget so a full run takes well under a second per case.
fn quick(cmd: &mut Command) -> &mut Command {
    cmd.args(["--bm-max-secs", "0.02", "--bm-min-usec", "50", "--threads", "1,2"])
}

#[test]
fn help_flag() {
    setbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings"));
}

#[test]
fn version_flag() {
    setbench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("setbench"));
}

#[test]
fn list_settings() {
    setbench()
        .arg("--list-settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("setbench_trivial (i64) = 100"))
        .stdout(predicate::str::contains("setbench_non_trivial"));
}

#[test]
fn override_applied_before_listing() {
    setbench()
        .args(["--setting", "setbench_trivial=7", "--list-settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setbench_trivial (i64) = 7"));
}

#[test]
fn rust_log_raises_verbosity() {
    setbench()
        .env("RUST_LOG", "info")
        .args(["--setting", "setbench_trivial=7", "--list-settings"])
        .assert()
        .success()
        .stderr(predicate::str::contains("applied command-line override"));
}

#[test]
fn default_log_level_is_quiet() {
    setbench()
        .env_remove("RUST_LOG")
        .args(["--setting", "setbench_trivial=7", "--list-settings"])
        .assert()
        .success()
        .stderr(predicate::str::contains("applied command-line override").not());
}

#[test]
fn unknown_setting_fails() {
    setbench()
        .args(["--setting", "setbench_missing=1", "--list-settings"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown setting"));
}

#[test]
fn malformed_override_fails() {
    setbench()
        .args(["--setting", "setbench_trivial", "--list-settings"])
        .assert()
        .code(4);
}

#[test]
fn invalid_value_fails() {
    setbench()
        .args(["--setting", "setbench_trivial=lots", "--list-settings"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn zero_threads_fails() {
    setbench().args(["--threads", "0"]).assert().code(4);
}

#[test]
fn filter_without_match_fails() {
    let mut cmd = setbench();
    quick(&mut cmd)
        .args(["--bm-filter", "no_such_case"])
        .assert()
        .code(4);
}

#[test]
fn table_output() {
    let mut cmd = setbench();
    quick(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("time/iter"))
        .stdout(predicate::str::contains("trivial_access "))
        .stdout(predicate::str::contains("non_trivial_access "))
        .stdout(predicate::str::contains("trivial_access_parallel(2thr)"))
        .stdout(predicate::str::contains("non_trivial_access_parallel(1thr)"))
        .stdout(predicate::str::contains("-".repeat(76)));
}

#[test]
fn json_output() {
    let mut cmd = setbench();
    let output = quick(&mut cmd).arg("--json").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["name"], "trivial_access");
    assert_eq!(rows[5]["name"], "non_trivial_access_parallel(2thr)");
    for row in rows {
        let ns = row["ns_per_iter"].as_f64().unwrap();
        assert!(ns > 0.0 && ns.is_finite());
    }
}

#[test]
fn locked_filtered_run() {
    let mut cmd = setbench();
    let output = quick(&mut cmd)
        .args(["--locked", "--bm-filter", "trivial_access_parallel", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "trivial_access_parallel(1thr)",
            "trivial_access_parallel(2thr)",
            "non_trivial_access_parallel(1thr)",
            "non_trivial_access_parallel(2thr)",
        ]
    );
}
