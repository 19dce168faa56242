//! Runtime settings.
//!
//! Built once at startup from defaults, an optional `.localdev.toml` file and the
//! process environment (highest precedence), then passed by reference.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Resolved settings for a single run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root holding one checkout per service (`BUILD_WORK_DIR`).
    pub work_dir: PathBuf,
    /// Cloud project that owns the registry credentials.
    pub project_id: String,
    /// Secret id holding the package registry username.
    pub username_secret_id: String,
    /// Secret id holding the package registry password.
    pub password_secret_id: String,
    /// Version label requested from the secret store.
    pub secret_version: String,
    /// Directory containing the `local_deploy_*` helpers.
    pub scripts_dir: PathBuf,
    /// Build-test entry point.
    pub main_test: PathBuf,
    /// Template for the per-release artifact directory.
    pub artifact_dir_template: String,
    /// Minikube program name or path.
    pub minikube: PathBuf,
}

/// Optional on-disk overrides. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub work_dir: Option<PathBuf>,
    pub project_id: Option<String>,
    pub username_secret_id: Option<String>,
    pub password_secret_id: Option<String>,
    pub secret_version: Option<String>,
    pub scripts_dir: Option<PathBuf>,
    pub main_test: Option<PathBuf>,
    pub artifact_dir_template: Option<String>,
    pub minikube: Option<PathBuf>,
}

impl FileSettings {
    /// Parse settings from a TOML file.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            ConfigError::InvalidFile {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            }
            .into()
        })
    }

    /// Locate and read the settings file, if any.
    ///
    /// `LOCALDEV_CONFIG` must point at an existing file when set; the home
    /// directory fallback is skipped silently when absent.
    pub fn discover(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(explicit) = lookup(constants::CONFIG_ENV) {
            return Self::read(Path::new(&explicit));
        }
        match dirs::home_dir().map(|home| home.join(constants::CONFIG_FILE)) {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading settings file");
                Self::read(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

impl Settings {
    /// Load settings from the real process environment.
    pub fn load() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let file = FileSettings::discover(&lookup)?;
        Self::resolve(file, &lookup)
    }

    /// Layer environment values over file values over defaults.
    pub fn resolve(file: FileSettings, lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let work_dir = lookup(constants::WORK_DIR_ENV)
            .map(PathBuf::from)
            .or(file.work_dir)
            .ok_or(ConfigError::MissingVar(constants::WORK_DIR_ENV))?;

        let scripts_dir = lookup(constants::SCRIPTS_DIR_ENV)
            .map(PathBuf::from)
            .or(file.scripts_dir)
            .unwrap_or_else(|| work_dir.join(constants::DEFAULT_SCRIPTS_SUBDIR));

        let main_test = lookup(constants::MAIN_TEST_ENV)
            .map(PathBuf::from)
            .or(file.main_test)
            .unwrap_or_else(|| scripts_dir.join(constants::MAIN_TEST_SCRIPT));

        let settings = Self {
            project_id: lookup(constants::PROJECT_ID_ENV)
                .or(file.project_id)
                .unwrap_or_else(|| constants::DEFAULT_PROJECT_ID.to_string()),
            username_secret_id: lookup(constants::USERNAME_SECRET_ENV)
                .or(file.username_secret_id)
                .unwrap_or_else(|| constants::DEFAULT_USERNAME_SECRET.to_string()),
            password_secret_id: lookup(constants::PASSWORD_SECRET_ENV)
                .or(file.password_secret_id)
                .unwrap_or_else(|| constants::DEFAULT_PASSWORD_SECRET.to_string()),
            secret_version: file
                .secret_version
                .unwrap_or_else(|| constants::DEFAULT_SECRET_VERSION.to_string()),
            artifact_dir_template: file
                .artifact_dir_template
                .unwrap_or_else(|| constants::DEFAULT_ARTIFACT_DIR_TEMPLATE.to_string()),
            minikube: lookup(constants::MINIKUBE_ENV)
                .map(PathBuf::from)
                .or(file.minikube)
                .unwrap_or_else(|| PathBuf::from(constants::MINIKUBE)),
            work_dir,
            scripts_dir,
            main_test,
        };

        debug!(?settings, "settings resolved");
        Ok(settings)
    }

    /// Path of a deploy helper inside the scripts directory.
    pub fn helper(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(name)
    }

    /// Pipeline file for a service checkout.
    pub fn jenkinsfile(&self, service: &str) -> PathBuf {
        self.work_dir.join(service).join(constants::PIPELINE_FILE)
    }

    /// Artifact directory for a release, from the configured template.
    pub fn artifact_dir(&self, release: &str) -> PathBuf {
        PathBuf::from(
            self.artifact_dir_template
                .replace("{work_dir}", &self.work_dir.to_string_lossy())
                .replace("{release}", release),
        )
    }
}
