//! Build-test artifact cleanup.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::constants::ARTIFACT_FILES;

/// Delete the known artifact files from `dir`, skipping missing ones.
///
/// Best effort: failures are logged, never returned. Returns the files removed.
pub fn cleanup(dir: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for name in ARTIFACT_FILES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed artifact");
                removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), "failed to remove artifact: {}", e),
        }
    }
    removed
}

/// Runs [`cleanup`] when dropped, whichever way the workflow exits.
#[derive(Debug)]
pub struct CleanupGuard {
    dir: PathBuf,
}

impl CleanupGuard {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        cleanup(&self.dir);
    }
}
