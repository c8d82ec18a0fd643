use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn critval() -> Command {
    let mut cmd = Command::cargo_bin("critval").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_defaults_print_t_right_tailed() {
    critval()
        .assert()
        .success()
        .stdout("Critical t-value (Right): 1.8125\n");
}

#[test]
fn test_critical_two_tailed_normal() {
    critval()
        .args(["critical", "--distribution", "z", "--tail", "two"])
        .assert()
        .success()
        .stdout("Critical z-value: ±1.9600\n");
}

#[test]
fn test_critical_left_tailed_t() {
    critval()
        .args(["critical", "-d", "t", "--tail", "left", "--df", "10"])
        .assert()
        .success()
        .stdout("Critical t-value (Left): -1.8125\n");
}

#[test]
fn test_chi_square_prints_note_and_ignores_tail() {
    critval()
        .args(["critical", "-d", "chi2", "--tail", "two", "--df", "10"])
        .assert()
        .success()
        .stdout("Critical Chi-Square value: 18.3070\n")
        .stderr(predicate::str::contains(
            "Only Right-Tailed critical values are shown",
        ));
}

#[test]
fn test_f_critical_value() {
    critval()
        .args(["critical", "-d", "f", "--dfn", "1", "--dfd", "10"])
        .assert()
        .success()
        .stdout("Critical F-value: 4.9646\n");
}

#[test]
fn test_large_degrees_of_freedom() {
    critval()
        .args(["critical", "-d", "chi2", "--df", "4294967295"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("NaN").not());

    critval()
        .args(["critical", "-d", "t", "--df", "100000000"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout("Critical t-value (Right): 1.6449\n");
}

#[test]
fn test_p_value_negative_statistic() {
    critval()
        .args(["p-value", "-d", "z", "--tail", "left", "--statistic", "-1.6449"])
        .assert()
        .success()
        .stdout("P-value: 0.0500\n");
}

#[test]
fn test_p_value_rejects_negative_chi_square_statistic() {
    critval()
        .args(["p-value", "-d", "chi2", "--statistic", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-negative support"));
}

#[test]
fn test_invalid_alpha() {
    critval()
        .args(["critical", "--alpha", "0.75"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("significance level must be in (0, 0.5]"));
}

#[test]
fn test_unknown_distribution() {
    critval()
        .args(["critical", "-d", "gamma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown distribution"));
}

#[test]
fn test_json_output() {
    let output = critval()
        .args(["critical", "-d", "z", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["type"], "critical-value");
    assert_eq!(value["kind"], "standard-normal");
    let quantile = value["quantile"].as_f64().unwrap();
    assert!((quantile - 1.6449).abs() < 1e-4);
}

#[test]
fn test_table() {
    critval()
        .args(["table", "-d", "t", "--df-from", "9", "--df-to", "10", "--alpha", "0.05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Critical t-value (Right-Tailed)"))
        .stdout(predicate::str::contains("1.8125"))
        .stdout(predicate::str::contains("1.8331"));
}

#[test]
fn test_batch_to_file() {
    let tmp_dir = TempDir::new().unwrap();
    let input = tmp_dir.path().join("requests.json");
    let output = tmp_dir.path().join("results.json");
    fs::write(
        &input,
        r#"[
            {"distribution": "z", "tail": "two"},
            {"distribution": "t", "mode": "p-value", "tail": "two", "statistic": 2.228139},
            {"distribution": "f", "mode": "p-value", "statistic": -1.0}
        ]"#,
    )
    .unwrap();

    critval()
        .args(["batch", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["formatted"], "Critical z-value: ±1.9600");
    assert_eq!(records[1]["formatted"], "P-value: 0.0500");
    assert!(records[2]["error"].is_string());
}

#[test]
fn test_batch_requires_input_flag() {
    critval()
        .args(["batch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_batch_strict_fails_on_bad_request() {
    let tmp_dir = TempDir::new().unwrap();
    let input = tmp_dir.path().join("requests.json");
    fs::write(&input, r#"[{"distribution": "t", "df": 0}]"#).unwrap();

    critval()
        .args(["batch", "--input"])
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 requests failed"));
}
