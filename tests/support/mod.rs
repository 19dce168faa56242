//! Test support utilities for localdev integration tests.
//!
//! Provides an isolated work directory populated with fake helper scripts that
//! record how they were invoked.

#![allow(dead_code)]


#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// `work` is the `BUILD_WORK_DIR`; `bin` is prepended to `PATH` and holds fake
/// `gcloud` and `minikube`. Every fake appends one line to `calls.log`.
pub struct Test {
    pub work: TempDir,
    pub bin: TempDir,
    pub home: TempDir,
}

impl Test {
    /// Create an environment where every helper succeeds.
    pub fn new() -> Self {
        let t = Self {
            work: TempDir::new().expect("failed to create work dir"),
            bin: TempDir::new().expect("failed to create bin dir"),
            home: TempDir::new().expect("failed to create temp home"),
        };
        fs::create_dir_all(t.scripts_dir()).expect("failed to create scripts dir");

        for helper in HELPERS {
            t.helper(helper, "exit 0");
        }
        t.fake_bin("minikube", "exit 0");
        t.fake_bin("gcloud", FAKE_GCLOUD);
        t.helper("main_test.sh", FAKE_MAIN_TEST);
        t
    }

    /// Directory holding the deploy helpers.
    pub fn scripts_dir(&self) -> PathBuf {
        self.work.path().join("local-deploy").join("scripts")
    }

    /// Replace a deploy helper. `body` runs after the invocation is logged.
    pub fn helper(&self, name: &str, body: &str) {
        write_script(&self.scripts_dir().join(name), &self.log(), body);
    }

    /// Replace a fake program on `PATH`.
    pub fn fake_bin(&self, name: &str, body: &str) {
        write_script(&self.bin.path().join(name), &self.log(), body);
    }

    /// Create a service checkout with the given Jenkinsfile.
    pub fn service(&self, name: &str, jenkinsfile: &str) -> PathBuf {
        let dir = self.work.path().join(name);
        fs::create_dir_all(&dir).expect("failed to create service dir");
        fs::write(dir.join("Jenkinsfile"), jenkinsfile).expect("failed to write Jenkinsfile");
        dir
    }

    /// Path of the invocation log.
    pub fn log(&self) -> PathBuf {
        self.work.path().join("calls.log")
    }

    /// Recorded invocations, one `<program> <args>` line each.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Recorded invocations excluding the fake gcloud.
    pub fn deploy_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("gcloud"))
            .collect()
    }
}

fn write_script(path: &Path, log: &Path, body: &str) {
    let script = format!(
        "#!/bin/sh\necho \"$(basename \"$0\") $*\" >> '{}'\n{}\n",
        log.display(),
        body
    );
    fs::write(path, script).expect("failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script");
}
