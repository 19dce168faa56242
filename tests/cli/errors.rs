//! Tests for configuration errors and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--remove-tools"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("localdev"));
}

#[test]
fn test_missing_work_dir_is_fatal() {
    let t = Test::new();

    let output = t
        .cmd()
        .env_remove("BUILD_WORK_DIR")
        .arg("start")
        .output()
        .unwrap();
    assert_exit_one(&output);
    assert_stderr_contains(&output, "BUILD_WORK_DIR");
    assert!(t.calls().is_empty());
}

#[test]
fn test_settings_file_supplies_work_dir() {
    let t = Test::new();
    let config = t.home.path().join("custom.toml");
    std::fs::write(
        &config,
        format!("work_dir = '{}'\n", t.work.path().display()),
    )
    .unwrap();

    let output = t
        .cmd()
        .env_remove("BUILD_WORK_DIR")
        .env("LOCALDEV_CONFIG", &config)
        .args(["--deploy", "web"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.calls(), ["local_deploy_service service web"]);
}

#[test]
fn test_invalid_settings_file() {
    let t = Test::new();
    let config = t.home.path().join("bad.toml");
    std::fs::write(&config, "not_a_setting = 1\n").unwrap();

    t.cmd()
        .env("LOCALDEV_CONFIG", &config)
        .arg("start")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn test_nothing_to_do() {
    let t = Test::new();

    t.cmd()
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to do"));
}

#[test]
fn test_dry_run_executes_nothing() {
    let t = Test::new();

    let output = t.run(&["--dry-run", "--tools", "redis", "--build-test", "api", "stop"]);
    assert_success(&output);
    assert_stdout_contains(&output, "build-test api");
    assert_stdout_contains(&output, "  policy    log-and-continue");
    assert_stdout_contains(&output, "  command   ");
    assert_stdout_contains(&output, "local_deploy_tools redis");
    assert!(t.calls().is_empty());
}

#[test]
fn test_verbose_emits_debug_logs() {
    let t = Test::new();

    let output = t.run(&["--verbose", "start"]);
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
}

#[test]
fn test_default_no_debug_output() {
    let t = Test::new();

    let output = t.run(&["start"]);
    assert_success(&output);
    let err = stderr(&output);
    assert!(!err.contains("DEBUG") && !err.contains("TRACE"));
}
