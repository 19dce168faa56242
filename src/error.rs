//! Error types for localdev.
//!
//! One enum per concern, folded into [`Error`] so callers can use `?` freely.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable not set: {0}")]
    MissingVar(&'static str),

    #[error("invalid config file {path}: {reason}")]
    InvalidFile { path: PathBuf, reason: String },
}

/// Errors reading settings out of a pipeline file.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("pipeline file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Secret store failures.
///
/// The first four are the kinds the accessor distinguishes in its diagnostics;
/// `Unavailable` is what a workflow reports once a secret came back absent.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret manager API error for {name}: {reason}")]
    Api { name: String, reason: String },

    #[error("secret manager retries exhausted for {name}: {reason}")]
    RetryExhausted { name: String, reason: String },

    #[error("unexpected error accessing {name}: {reason}")]
    Unexpected { name: String, reason: String },

    #[error("unable to retrieve secrets")]
    Unavailable,
}

impl SecretError {
    /// Short label naming the failure kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not found",
            Self::Api { .. } => "api error",
            Self::RetryExhausted { .. } => "retry error",
            Self::Unexpected { .. } => "unexpected error",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Subprocess failures.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("executable not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} failed with exit code {code}")]
    Failed { label: String, code: i32 },
}

pub type Result<T> = std::result::Result<T, Error>;
