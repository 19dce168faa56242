//! Tests for `--build-test`.

use crate::support::*;

#[test]
fn test_build_test_passes_settings_and_secrets() {
    let t = Test::new();
    t.service("api", FULL_JENKINSFILE);

    let output = t.run(&["--build-test", "api"]);
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "user=pypi-username-value pass=pypi-password-value it=True args=api requirements-test.txt docker/Dockerfile",
    );
    // stderr of the script is merged into stdout
    assert_stdout_contains(&output, "from-stderr");
    assert_eq!(
        t.deploy_calls(),
        ["main_test.sh api requirements-test.txt docker/Dockerfile"]
    );
}

#[test]
fn test_unset_settings_use_defaults_and_none() {
    let t = Test::new();
    t.service("api", EMPTY_JENKINSFILE);

    let output = t.run(&["--build-test", "api"]);
    assert_success(&output);
    assert_stdout_contains(&output, "it=False args=api None None");
}

#[test]
fn test_custom_secret_ids_and_project() {
    let t = Test::new();
    t.service("api", FULL_JENKINSFILE);

    let output = t
        .cmd()
        .env("USERNAME_SECRET_ID", "ci-user")
        .env("PASSWORD_SECRET_ID", "ci-pass")
        .env("GCP_PROJECT_ID", "my-project")
        .args(["--build-test", "api"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "user=ci-user-value pass=ci-pass-value");
    assert!(t
        .calls()
        .contains(&"gcloud secrets versions access latest --secret=ci-user --project=my-project".to_string()));
}

#[test]
fn test_missing_jenkinsfile_is_fatal() {
    let t = Test::new();

    let output = t.run(&["--build-test", "ghost", "--deploy", "web"]);
    assert_exit_one(&output);
    assert_stderr_contains(&output, "pipeline file not found");
    assert!(t.calls().is_empty());
}

#[test]
fn test_missing_secret_is_fatal() {
    let t = Test::new();
    t.service("api", FULL_JENKINSFILE);

    let output = t
        .cmd()
        .env("PASSWORD_SECRET_ID", "missing-password")
        .args(["--build-test", "api", "--deploy", "web"])
        .output()
        .unwrap();
    assert_exit_one(&output);
    assert_stderr_contains(&output, "unable to retrieve secrets");
    let warnings: Vec<String> = stderr(&output)
        .lines()
        .filter(|line| line.contains("failed to access secret"))
        .map(str::to_string)
        .collect();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("not found"));
    assert!(t.deploy_calls().is_empty());
}

#[test]
fn test_failed_build_test_does_not_abort_later_steps() {
    let t = Test::new();
    t.service("api", FULL_JENKINSFILE);

    let output = t
        .cmd()
        .env("MAIN_TEST_EXIT", "9")
        .args(["--build-test", "api", "--deploy", "web"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "exited with code 9");
    assert_eq!(
        t.deploy_calls(),
        [
            "main_test.sh api requirements-test.txt docker/Dockerfile",
            "local_deploy_service service web",
        ]
    );
}

#[test]
fn test_artifacts_cleaned_up_after_run() {
    let t = Test::new();
    let dir = t.service("api", FULL_JENKINSFILE);

    assert_success(&t.run(&["--build-test", "api"]));
    for name in ["setup_buildx.sh", "run_tests.sh", "main_test.sh"] {
        assert!(!dir.join(name).exists(), "{} left behind", name);
    }
    assert!(dir.join("Jenkinsfile").exists());
}

#[test]
fn test_missing_main_test_script_reports_exit_one() {
    let t = Test::new();
    t.service("api", FULL_JENKINSFILE);
    std::fs::remove_file(t.scripts_dir().join("main_test.sh")).unwrap();

    let output = t.run(&["--build-test", "api"]);
    // exit code of the build-test run is informational only
    assert_success(&output);
    assert_stderr_contains(&output, "script not found");
    assert_stderr_contains(&output, "exited with code 1");
}
