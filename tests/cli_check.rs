use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn check_valid_grammar_via_cli() {
    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check")
        .arg(fixture_path("ini.yaml"))
        .arg("--categories-file")
        .arg(fixture_path("ini.categories"));

    let output_pred = predicate::str::contains("grammar ini")
        .and(predicate::str::contains("root: 4 rule(s)"))
        .and(predicate::str::contains("value: 2 rule(s)"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn check_aborts_on_first_failure() {
    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check")
        .arg(fixture_path("broken.json"))
        .args(["-c", "number", "-c", "comment", "-c", "name"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("error: rule #1"))
        .stdout(predicate::str::contains("regex syntax error in pattern `(`"))
        .stdout(predicate::str::contains("rule #2").not());
}

#[test]
fn check_collects_all_failures_as_json() {
    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check")
        .arg(fixture_path("broken.json"))
        .args(["-c", "number", "-c", "comment", "-c", "name"])
        .arg("--collect")
        .args(["--format", "json"]);

    let output = cmd.assert().failure().get_output().stdout.clone();
    let summary: serde_json::Value = serde_json::from_slice(&output).expect("json output");

    let indexes: Vec<u64> = summary["failures"]
        .as_array()
        .expect("failures array")
        .iter()
        .map(|f| f["index"].as_u64().expect("index"))
        .collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(summary["grammar"], "broken");
    assert_eq!(summary["states"][0]["rules"], 2);
    assert!(summary["failures"][1]["error"]
        .as_str()
        .unwrap()
        .contains("state not found: comment"));
    assert!(summary["failures"][2]["error"]
        .as_str()
        .unwrap()
        .contains("unknown token category: unknown-category-xyz"));
}

#[test]
fn check_rejects_unknown_extension() {
    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check").arg(fixture_path("ini.categories"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported grammar file format"));
}

fn failure_indexes(stdout: &[u8]) -> Vec<u64> {
    let summary: serde_json::Value = serde_json::from_slice(stdout).expect("json output");
    summary["failures"]
        .as_array()
        .expect("failures array")
        .iter()
        .map(|f| f["index"].as_u64().expect("index"))
        .collect()
}

#[test]
fn check_reads_policy_from_config_file() {
    let config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    std::fs::write(config.path(), "[resolution]\non_failure = \"collect\"\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check")
        .arg(fixture_path("broken.json"))
        .args(["-c", "number", "-c", "comment", "-c", "name"])
        .arg("--config")
        .arg(config.path())
        .args(["--format", "json"]);

    let output = cmd.assert().failure().get_output().stdout.clone();
    assert_eq!(failure_indexes(&output), vec![1, 2, 3]);
}

#[test]
fn check_picks_up_local_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("lexgram.toml"),
        "[resolution]\non_failure = \"collect\"\n",
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg(fixture_path("broken.json"))
        .args(["-c", "number", "-c", "comment", "-c", "name"])
        .args(["--format", "json"]);

    let output = cmd.assert().failure().get_output().stdout.clone();
    assert_eq!(failure_indexes(&output), vec![1, 2, 3]);
}

#[test]
fn check_config_file_overrides_local_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("lexgram.toml"),
        "[resolution]\non_failure = \"collect\"\n",
    )
    .expect("write config");
    let explicit = dir.path().join("strict.toml");
    std::fs::write(&explicit, "[resolution]\non_failure = \"abort\"\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg(fixture_path("broken.json"))
        .args(["-c", "number", "-c", "comment", "-c", "name"])
        .arg("--config")
        .arg(&explicit)
        .args(["--format", "json"]);

    let output = cmd.assert().failure().get_output().stdout.clone();
    assert_eq!(failure_indexes(&output), vec![1]);
}

#[test]
fn check_rejects_multiline_switch_in_config() {
    let config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    std::fs::write(config.path(), "[pattern]\nmultiline = false\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("lexgram");
    cmd.arg("check")
        .arg(fixture_path("ini.yaml"))
        .arg("--categories-file")
        .arg(fixture_path("ini.categories"))
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("multiline"));
}
