//! Pipeline file extraction.
//!
//! Pulls build-test settings out of a service's Jenkinsfile. Files are scanned
//! line by line and the first matching line wins.
//!
//! [`extract_first`] and the named wrappers read one setting per pass;
//! [`scan`] applies the same per-line rule to several keys in a single pass and
//! is what the build-test workflow uses.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, PipelineError, Result};

pub const INTEGRATION_TESTS_KEY: &str = "INTEGRATION_TESTS";
pub const TEST_REQUIREMENTS_KEY: &str = "TEST_REQUIREMENTS";
pub const DOCKERFILE_LOCATION_KEY: &str = "DOCKERFILE_LOCATION";

/// Keys the build-test workflow reads.
pub const BUILD_TEST_KEYS: &[&str] = &[
    INTEGRATION_TESTS_KEY,
    TEST_REQUIREMENTS_KEY,
    DOCKERFILE_LOCATION_KEY,
];

/// Pattern matching `KEY = 'value'` (either quote style), capturing the value.
///
/// The key must start at a word boundary, so `RUN_KEY` does not match `KEY`.
pub fn setting_pattern(key: &str) -> Result<Regex> {
    let pattern = format!(r#"\b{}\s*=\s*['"]([^'"]*)['"]"#, regex::escape(key));
    Regex::new(&pattern).map_err(|e| PipelineError::from(e).into())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PipelineError::NotFound(path.to_path_buf()),
        _ => PipelineError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(BufReader::new(file))
}

fn lines(path: &Path) -> Result<impl Iterator<Item = Result<String>> + '_> {
    Ok(open(path)?.lines().map(move |line| {
        line.map_err(|e| {
            Error::from(PipelineError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        })
    }))
}

/// Apply `pattern` to one line.
///
/// `None` when the line does not match; `Some(None)` when it matches but
/// `group` did not participate.
fn capture(pattern: &Regex, line: &str, group: usize) -> Option<Option<String>> {
    pattern
        .captures(line)
        .map(|caps| caps.get(group).map(|m| m.as_str().to_string()))
}

/// Return capture `group` of the first match on the first matching line.
///
/// Errors with `PipelineError::NotFound` when the file is missing. Returns
/// `Ok(None)` when no line matches, or when the group did not participate.
pub fn extract_first(path: &Path, pattern: &Regex, group: usize) -> Result<Option<String>> {
    for line in lines(path)? {
        if let Some(value) = capture(pattern, &line?, group) {
            return Ok(value);
        }
    }
    Ok(None)
}

/// Scan a file once for several keys, first match per key.
///
/// A key written with an empty value maps to `Some("")`; a key that never
/// appears is absent from the map.
pub fn scan(path: &Path, keys: &[&str]) -> Result<BTreeMap<String, String>> {
    let patterns = keys
        .iter()
        .map(|key| -> Result<(String, Regex)> { Ok((key.to_string(), setting_pattern(key)?)) })
        .collect::<Result<Vec<_>>>()?;

    // first matching line decides each key, as in `extract_first`
    let mut decided: BTreeMap<String, Option<String>> = BTreeMap::new();
    for line in lines(path)? {
        let line = line?;
        for (key, pattern) in &patterns {
            if decided.contains_key(key) {
                continue;
            }
            if let Some(value) = capture(pattern, &line, 1) {
                decided.insert(key.clone(), value);
            }
        }
        if decided.len() == patterns.len() {
            break;
        }
    }

    let found: BTreeMap<String, String> = decided
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();
    debug!(path = %path.display(), keys = ?found.keys().collect::<Vec<_>>(), "pipeline scanned");
    Ok(found)
}

/// Integration-tests flag (`INTEGRATION_TESTS = 'True'`).
pub fn integration_tests(path: &Path) -> Result<Option<String>> {
    extract_first(path, &setting_pattern(INTEGRATION_TESTS_KEY)?, 1)
}

/// Test requirements file path.
pub fn test_requirements(path: &Path) -> Result<Option<String>> {
    extract_first(path, &setting_pattern(TEST_REQUIREMENTS_KEY)?, 1)
}

/// Dockerfile location.
pub fn dockerfile_location(path: &Path) -> Result<Option<String>> {
    extract_first(path, &setting_pattern(DOCKERFILE_LOCATION_KEY)?, 1)
}
