//! Secret accessor.
//!
//! Reads a single secret version from Google Cloud Secret Manager. Every failure
//! is logged once with its kind and mapped to `None`; callers decide whether an
//! absent secret is fatal.
//!
//! ## Requirements
//!
//! - `gcloud` CLI must be installed and authenticated
//! - The caller needs `secretmanager.versions.access` on the secret

use std::fmt;
use std::process::{Command, Stdio};
use tracing::{trace, warn};
use zeroize::Zeroizing;

use crate::error::SecretError;

/// Fully-qualified secret version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretVersion {
    pub project: String,
    pub secret_id: String,
    pub version: String,
}

impl SecretVersion {
    pub fn new(project: &str, secret_id: &str, version: &str) -> Self {
        Self {
            project: project.to_string(),
            secret_id: secret_id.to_string(),
            version: version.to_string(),
        }
    }
}

impl fmt::Display for SecretVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/secrets/{}/versions/{}",
            self.project, self.secret_id, self.version
        )
    }
}

/// Backend able to read one secret version.
///
/// Implemented by the gcloud backend and by fakes in tests.
pub trait SecretStore {
    fn access(&self, name: &SecretVersion) -> std::result::Result<Zeroizing<String>, SecretError>;
}

/// Fetch a secret, mapping every failure kind to `None`.
pub fn fetch(
    store: &dyn SecretStore,
    project: &str,
    secret_id: &str,
    version: &str,
) -> Option<Zeroizing<String>> {
    let name = SecretVersion::new(project, secret_id, version);
    trace!(secret = %name, "accessing secret version");

    match store.access(&name) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(secret = %name, kind = e.kind(), "failed to access secret: {}", e);
            None
        }
    }
}

/// Secret Manager backend using the gcloud CLI.
#[derive(Debug, Default)]
pub struct GcloudSecretStore;

impl GcloudSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for GcloudSecretStore {
    fn access(&self, name: &SecretVersion) -> std::result::Result<Zeroizing<String>, SecretError> {
        let gcloud = which::which("gcloud").map_err(|_| SecretError::Unexpected {
            name: name.to_string(),
            reason: "gcloud CLI not found. Install it from https://cloud.google.com/sdk/docs/install"
                .to_string(),
        })?;

        let output = Command::new(gcloud)
            .args([
                "secrets",
                "versions",
                "access",
                name.version.as_str(),
                format!("--secret={}", name.secret_id).as_str(),
                format!("--project={}", name.project).as_str(),
            ])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SecretError::Unexpected {
                name: name.to_string(),
                reason: format!("failed to spawn gcloud: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify(&name.to_string(), stderr.trim()));
        }

        let payload = String::from_utf8(output.stdout).map_err(|e| SecretError::Unexpected {
            name: name.to_string(),
            reason: format!("UTF-8 error: {}", e),
        })?;

        trace!(secret = %name, payload_len = payload.len(), "secret accessed");
        Ok(Zeroizing::new(payload))
    }
}

/// Map gcloud's stderr onto a failure kind.
pub fn classify(name: &str, stderr: &str) -> SecretError {
    const TRANSIENT: &[&str] = &["UNAVAILABLE", "DEADLINE_EXCEEDED", "RESOURCE_EXHAUSTED"];

    if stderr.contains("NOT_FOUND") || stderr.to_ascii_lowercase().contains("not found") {
        return SecretError::NotFound(name.to_string());
    }
    if TRANSIENT.iter().any(|code| stderr.contains(code)) {
        return SecretError::RetryExhausted {
            name: name.to_string(),
            reason: stderr.to_string(),
        };
    }
    SecretError::Api {
        name: name.to_string(),
        reason: stderr.to_string(),
    }
}
