use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn reconcile_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("reconcile"));
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const STAGE_TEMPLATE: &str = "spec:\n  foo: <+input>\n";

const STAGE_IN_SYNC: &str = r#"
stage:
  identifier: deploy
  template:
    templateRef: deploy_tpl
    templateInputs:
      spec:
        foo: <+input>
"#;

const STAGE_DRIFTED: &str = r#"
stage:
  identifier: deploy
  template:
    templateRef: deploy_tpl
    templateInputs:
      spec:
        bar: <+input>
"#;

#[test]
fn compare_reports_in_sync_stage() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_IN_SYNC);

    reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage", "--check"])
        .assert()
        .success()
        .stdout(contains("in sync"));
}

#[test]
fn compare_lists_findings_for_drifted_stage() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_DRIFTED);

    reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage"])
        .assert()
        .success()
        .stdout(contains("out of sync"))
        .stdout(contains("spec.foo"))
        .stdout(contains("spec.bar"));
}

#[test]
fn check_flag_fails_when_out_of_sync() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_DRIFTED);

    reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage", "--check"])
        .assert()
        .failure()
        .stderr(contains("out of sync"));
}

#[test]
fn json_output_carries_has_difference_flag() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_DRIFTED);

    let assert = reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage", "--json", "--updated"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");

    assert_eq!(value["hasDifference"], serde_json::json!(true));
    let differences = value["differences"].as_array().expect("array");
    // --updated drops the missing-in-target finding for spec.foo.
    assert_eq!(differences.len(), 1);
    assert_eq!(differences[0]["kind"], "undeclared_in_template");
    assert_eq!(differences[0]["path"], "spec.bar");
}

#[test]
fn config_file_extends_exclusions() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_DRIFTED);
    write(&dir, ".reconcile.yaml", "extra_excluded_paths:\n  - spec.bar\n  - spec.foo\n");

    reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage", "--check"])
        .assert()
        .success();
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_IN_SYNC);

    reconcile_cmd(dir.path())
        .arg("compare")
        .arg(&template)
        .arg(&stage)
        .args(["--config", "nope.yaml"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    reconcile_cmd(dir.path())
        .args(["compare", "a.yaml", "b.yaml", "--mode", "service"])
        .assert()
        .failure()
        .stderr(contains("unknown mode"));
}

#[test]
fn paths_lists_runtime_inputs_in_template_space() {
    let dir = TempDir::new().expect("tempdir");
    let stage = write(&dir, "stage.yaml", STAGE_IN_SYNC);

    reconcile_cmd(dir.path())
        .arg("paths")
        .arg(&stage)
        .args(["--runtime-only", "--root", "stage"])
        .assert()
        .success()
        .stdout("spec.foo\n");
}

#[test]
fn paths_summarises_runtime_input_modifiers() {
    let dir = TempDir::new().expect("tempdir");
    let inputs = write(
        &dir,
        "inputs.yaml",
        "spec:\n  timeout: \"<+input>.default(10m).allowedValues(5m,10m)\"\n  region: <+input>.executionInput()\n  name: <+input>\n",
    );

    reconcile_cmd(dir.path())
        .arg("paths")
        .arg(&inputs)
        .arg("--runtime-only")
        .assert()
        .success()
        .stdout("spec.timeout  default=10m allowed=5m,10m\nspec.region  execution-input\nspec.name\n");
}

#[test]
fn paths_lists_every_node() {
    let dir = TempDir::new().expect("tempdir");
    let file = write(&dir, "doc.yaml", "a:\n  b: [1, 2]\n");

    reconcile_cmd(dir.path())
        .arg("paths")
        .arg(&file)
        .assert()
        .success()
        .stdout("a\na.b\na.b[0]\na.b[1]\n");
}

#[test]
fn diff_shows_runtime_path_drift() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_DRIFTED);

    let assert = reconcile_cmd(dir.path())
        .arg("diff")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    assert!(stdout.lines().any(|l| l == "-spec.foo"));
    assert!(stdout.lines().any(|l| l == "+spec.bar"));
}

#[test]
fn diff_without_drift_says_so() {
    let dir = TempDir::new().expect("tempdir");
    let template = write(&dir, "template.yaml", STAGE_TEMPLATE);
    let stage = write(&dir, "stage.yaml", STAGE_IN_SYNC);

    reconcile_cmd(dir.path())
        .arg("diff")
        .arg(&template)
        .arg(&stage)
        .args(["--mode", "stage"])
        .assert()
        .success()
        .stdout(contains("No differences"));
}
