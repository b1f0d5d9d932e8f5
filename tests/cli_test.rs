//! End-to-end tests running the `flux` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn flux() -> Command {
    let mut cmd = Command::cargo_bin("flux").unwrap();
    cmd.env_remove("COMPLETE")
        .env_remove("FLUX_SYSTEM_NAMESPACE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn given_no_args_when_running_then_prints_help_and_succeeds() {
    flux()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: flux"))
        .stdout(predicate::str::contains("--namespace"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn given_version_command_when_running_then_prints_client_version() {
    flux()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("flux: v{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn given_version_json_when_running_then_prints_json() {
    flux()
        .args(["version", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "\"flux\": \"v{}\"",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn given_completion_command_when_running_then_prints_script() {
    flux()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flux"));
}

#[test]
fn given_malformed_timeout_when_running_then_fails_with_one_status_line() {
    let assert = flux()
        .args(["--timeout", "nope", "version"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("✗ "));

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn given_request_timeout_flag_when_running_then_rejected() {
    flux()
        .args(["--request-timeout", "5s", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--request-timeout"));
}

#[test]
fn given_short_server_flag_when_running_then_rejected() {
    flux()
        .args(["-s", "https://10.0.0.1:6443", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("✗ "));
}

#[test]
fn given_long_server_flag_when_running_then_accepted() {
    flux()
        .args(["--server", "https://10.0.0.1:6443", "version"])
        .assert()
        .success();
}

#[test]
fn given_namespace_env_when_running_then_help_shows_it_as_default() {
    flux()
        .env("FLUX_SYSTEM_NAMESPACE", "custom-ns")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom-ns"));
}

#[test]
fn given_complete_env_when_completing_context_then_lists_kubeconfig_contexts() {
    let dir = TempDir::new().unwrap();
    let kubeconfig = dir.path().join("config");
    fs::write(
        &kubeconfig,
        "contexts:\n  - name: kind-dev\n    context: {cluster: kind-dev}\n  - name: prod\n    context: {cluster: prod}\n",
    )
    .unwrap();

    flux()
        .env("COMPLETE", "fish")
        .env("KUBECONFIG", &kubeconfig)
        .args(["--", "flux", "--context", "kind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind-dev"))
        .stdout(predicate::str::contains("prod").not());
}

#[test]
fn given_kubeconfig_flag_when_completing_context_then_flag_file_wins_over_env() {
    let dir = TempDir::new().unwrap();
    let from_env = dir.path().join("env-config");
    let from_flag = dir.path().join("flag-config");
    fs::write(
        &from_env,
        "contexts:\n  - name: kind-env\n    context: {cluster: kind-env}\n",
    )
    .unwrap();
    fs::write(
        &from_flag,
        "contexts:\n  - name: kind-flag\n    context: {cluster: kind-flag}\n",
    )
    .unwrap();
    let flag = format!("--kubeconfig={}", from_flag.display());

    flux()
        .env("COMPLETE", "fish")
        .env("KUBECONFIG", &from_env)
        .args(["--", "flux", flag.as_str(), "--context", "kind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind-flag"))
        .stdout(predicate::str::contains("kind-env").not());
}
