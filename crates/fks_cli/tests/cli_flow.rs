use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fks_cli"))
}

#[test]
fn answers_membership_queries() {
    cli_cmd()
        .args(["--seed", "12244"])
        .write_stdin("4\n1 2 3 100\n4\n2 50 100 -1\n")
        .assert()
        .success()
        .stdout("Yes\nNo\nYes\nNo\n");
}

#[test]
fn empty_set_answers_no() {
    cli_cmd()
        .write_stdin("0\n3\n0 1 -1\n")
        .assert()
        .success()
        .stdout("No\nNo\nNo\n");
}

#[test]
fn duplicate_keys_collapse() {
    cli_cmd()
        .write_stdin("3 5 5 5 2 5 6")
        .assert()
        .success()
        .stdout("Yes\nNo\n");
}

#[test]
fn boundary_keys_round_trip() {
    cli_cmd()
        .write_stdin("3 -2147483648 2147483647 0  4 2147483647 -2147483648 0 1")
        .assert()
        .success()
        .stdout("Yes\nYes\nYes\nNo\n");
}

#[test]
fn reads_input_file_and_config() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("input.txt");
    let config = tmp.path().join("build.json");
    fs::write(&input, "5 10 20 30 40 50 3 30 31 50").unwrap();
    fs::write(&config, r#"{ "seed": 7, "memory_factor": 6, "max_primary_trials": 128 }"#).unwrap();

    cli_cmd()
        .args(["--input", input.to_str().unwrap(), "--config", config.to_str().unwrap(), "--stats"])
        .assert()
        .success()
        .stdout("Yes\nNo\nYes\n")
        .stderr(predicate::str::contains("sum_of_squares"));
}

#[test]
fn malformed_input_fails() {
    cli_cmd()
        .write_stdin("2 1 x 1 1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad key value"));
}

#[test]
fn truncated_input_fails() {
    cli_cmd()
        .write_stdin("3 1 2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 values"));
}

#[test]
fn unsatisfiable_memory_factor_fails() {
    cli_cmd()
        .args(["--memory-factor", "1"])
        .write_stdin("1 1 1 1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory_factor"));
}

#[test]
fn memory_factor_override_bounds_reported_stats() {
    let mut input = String::from("1000");
    for k in 0..1000 {
        input.push_str(&format!(" {}", k * 37 - 15_000));
    }
    input.push_str(" 2 -15000 1");

    let out = cli_cmd()
        .args(["--seed", "5", "--memory-factor", "8", "--stats"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("Yes\nNo\n")
        .get_output()
        .clone();

    let stats: serde_json::Value =
        serde_json::from_slice(&out.stderr).expect("stats json on stderr");
    assert_eq!(stats["keys"], 1000);
    let sum_of_squares = stats["sum_of_squares"].as_u64().expect("sum_of_squares");
    assert!(sum_of_squares >= 1000 && sum_of_squares < 8 * 1000);
    assert_eq!(stats["total_slots"].as_u64(), Some(sum_of_squares));
}

#[test]
fn verbose_logs_go_to_stderr() {
    cli_cmd()
        .args(["-vv", "--seed", "3"])
        .write_stdin("3 1 2 3 2 3 4")
        .assert()
        .success()
        .stdout("Yes\nNo\n")
        .stderr(predicate::str::contains("static set built"));
}
