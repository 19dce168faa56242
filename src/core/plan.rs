//! Typed execution plan.
//!
//! Each invocation is turned into an ordered list of [`Step`]s, each tagged with
//! a [`Policy`] deciding what a failure means. [`run`] executes them in order.

use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::build_test;
use crate::core::process::Executor;
use crate::core::secrets::SecretStore;
use crate::core::settings::Settings;
use crate::error::{ProcessError, Result};

/// What a failed step does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Stop the run and report an error.
    AbortOnFailure,
    /// Log a diagnostic and carry on.
    LogAndContinue,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbortOnFailure => f.write_str("abort-on-failure"),
            Self::LogAndContinue => f.write_str("log-and-continue"),
        }
    }
}

/// The work a step performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Build and test a service through the main test script.
    BuildTest { service: String },
    /// Run a program directly with inherited stdio.
    Exec { program: PathBuf, args: Vec<String> },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildTest { service } => write!(f, "build-test {}", service),
            Self::Exec { program, args } => {
                write!(f, "{}", program.display())?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

/// One entry of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub action: Action,
    pub policy: Policy,
}

impl Step {
    pub fn exec(label: impl Into<String>, program: PathBuf, args: &[&str], policy: Policy) -> Self {
        Self {
            label: label.into(),
            action: Action::Exec {
                program,
                args: args.iter().map(|a| a.to_string()).collect(),
            },
            policy,
        }
    }
}

/// Collaborators a plan needs at run time.
pub struct Context<'a> {
    pub settings: &'a Settings,
    pub store: &'a dyn SecretStore,
    pub executor: &'a mut dyn Executor,
}

/// Execute steps in order, applying each step's failure policy.
///
/// `on_step` is called before each step starts. Build-test preflight errors
/// (missing pipeline file, missing secrets) are always fatal; its exit code is
/// subject to the step policy like any other.
///
/// Returns the labels of steps that failed without stopping the run.
pub fn run(
    steps: &[Step],
    ctx: &mut Context<'_>,
    mut on_step: impl FnMut(&Step),
) -> Result<Vec<String>> {
    let mut failed = Vec::new();
    for step in steps {
        on_step(step);
        info!(step = %step.label, action = %step.action, policy = %step.policy, "running step");

        let outcome = match &step.action {
            Action::BuildTest { service } => {
                let prepared = build_test::prepare(ctx.settings, ctx.store, service)?;
                build_test::execute(&prepared, ctx.executor)
            }
            Action::Exec { program, args } => ctx.executor.exec(program, args),
        };

        match (step.policy, outcome) {
            (_, Ok(0)) => {}
            (Policy::AbortOnFailure, Ok(code)) => {
                return Err(ProcessError::Failed {
                    label: step.label.clone(),
                    code,
                }
                .into())
            }
            (Policy::AbortOnFailure, Err(e)) => return Err(e),
            (Policy::LogAndContinue, Ok(code)) => {
                warn!(step = %step.label, code, "{} exited with code {}", step.label, code);
                failed.push(step.label.clone());
            }
            (Policy::LogAndContinue, Err(e)) => {
                warn!(step = %step.label, "{} failed: {}", step.label, e);
                failed.push(step.label.clone());
            }
        }
    }
    Ok(failed)
}
