//! Constants used throughout localdev.
//!
//! Centralizes file names, environment variable names and defaults.

/// Settings file looked up in the home directory.
pub const CONFIG_FILE: &str = ".localdev.toml";

/// Explicit settings file path.
pub const CONFIG_ENV: &str = "LOCALDEV_CONFIG";

/// Work directory holding service checkouts (required).
pub const WORK_DIR_ENV: &str = "BUILD_WORK_DIR";

pub const PROJECT_ID_ENV: &str = "GCP_PROJECT_ID";
pub const USERNAME_SECRET_ENV: &str = "USERNAME_SECRET_ID";
pub const PASSWORD_SECRET_ENV: &str = "PASSWORD_SECRET_ID";
pub const SCRIPTS_DIR_ENV: &str = "LOCALDEV_SCRIPTS_DIR";
pub const MAIN_TEST_ENV: &str = "LOCALDEV_MAIN_TEST";
pub const MINIKUBE_ENV: &str = "LOCALDEV_MINIKUBE";

pub const DEFAULT_PROJECT_ID: &str = "local-dev-project";
pub const DEFAULT_USERNAME_SECRET: &str = "pypi-username";
pub const DEFAULT_PASSWORD_SECRET: &str = "pypi-password";
pub const DEFAULT_SECRET_VERSION: &str = "latest";

/// Helper scripts directory, relative to the work directory.
pub const DEFAULT_SCRIPTS_SUBDIR: &str = "local-deploy/scripts";

/// `{work_dir}` and `{release}` are substituted.
pub const DEFAULT_ARTIFACT_DIR_TEMPLATE: &str = "{work_dir}/{release}";

/// Pipeline definition scanned for build-test settings.
pub const PIPELINE_FILE: &str = "Jenkinsfile";

pub const MAIN_TEST_SCRIPT: &str = "main_test.sh";
pub const DEPLOY_SERVICE_HELPER: &str = "local_deploy_service";
pub const DEPLOY_TOOLS_HELPER: &str = "local_deploy_tools";
pub const DEPLOY_CICD_HELPER: &str = "local_deploy_cicd";
pub const MINIKUBE: &str = "minikube";

/// Files the build-test run leaves behind in the artifact directory.
pub const ARTIFACT_FILES: &[&str] = &["setup_buildx.sh", "run_tests.sh", "main_test.sh"];

/// Variables injected into the build-test process.
pub const PYPI_USER_ENV: &str = "PYPI_USER";
pub const PYPI_PASS_ENV: &str = "PYPI_PASS";
pub const INTEGRATION_TESTS_ENV: &str = "INTEGRATION_TESTS";

/// Substituted for the integration-tests flag when the pipeline does not set it.
pub const INTEGRATION_TESTS_DEFAULT: &str = "False";

/// Token passed for unset pipeline values; downstream scripts match on it.
pub const UNSET_ARG: &str = "None";
