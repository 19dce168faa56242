//! Subprocess execution.
//!
//! Two ways to launch things: scripts run through `sh` with merged, line-streamed
//! output and an environment overlay, and helper programs run directly with
//! inherited stdio. [`Executor`] is the seam the step runner drives.

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::error::{ProcessError, Result};

/// Extra environment for a single child, merged over the inherited environment.
pub type EnvOverlay = BTreeMap<String, Zeroizing<String>>;

/// Launches subprocesses on behalf of the step runner.
pub trait Executor {
    /// Run a program with inherited stdio and return its exit code.
    fn exec(&mut self, program: &Path, args: &[String]) -> Result<i32>;

    /// Run a script through the streaming runner and return its exit code.
    fn run_script(&mut self, script: &Path, args: &str, overlay: &EnvOverlay) -> Result<i32>;
}

/// Executor backed by real processes.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn exec(&mut self, program: &Path, args: &[String]) -> Result<i32> {
        let resolved = resolve(program)?;
        debug!(program = %resolved.display(), ?args, "exec");

        let status = Command::new(&resolved)
            .args(args)
            .status()
            .map_err(|e| ProcessError::Spawn {
                program: resolved.display().to_string(),
                source: e,
            })?;

        Ok(status.code().unwrap_or(1))
    }

    fn run_script(&mut self, script: &Path, args: &str, overlay: &EnvOverlay) -> Result<i32> {
        run_script(script, args, overlay, &mut io::stdout())
    }
}

/// Resolve a program to an executable path.
///
/// Bare names are looked up on `PATH`; anything containing a separator must exist.
pub fn resolve(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        if program.exists() {
            return Ok(program.to_path_buf());
        }
        return Err(ProcessError::NotFound(program.to_path_buf()).into());
    }
    which::which(program).map_err(|_| ProcessError::NotFound(program.to_path_buf()).into())
}

/// Run `script` with `args` appended verbatim, forwarding merged output to `out`.
///
/// Returns 1 without spawning anything when the script does not exist. Output is
/// forwarded line by line as the child writes it. The child is always waited
/// for; if `out` stops accepting writes the rest of the output is drained and
/// the write error is returned once the child has exited.
pub fn run_script(
    script: &Path,
    args: &str,
    overlay: &EnvOverlay,
    out: &mut dyn Write,
) -> Result<i32> {
    if !script.exists() {
        error!(script = %script.display(), "script not found");
        return Ok(1);
    }

    let quoted = shell_quote(&script.to_string_lossy());
    let command_line = if args.is_empty() {
        format!("{} 2>&1", quoted)
    } else {
        format!("{} {} 2>&1", quoted, args)
    };
    debug!(command = %command_line, overlay = ?overlay.keys().collect::<Vec<_>>(), "running script");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(&command_line)
        .envs(overlay.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::Spawn {
            program: script.display().to_string(),
            source: e,
        })?;

    let forwarded = match child.stdout.take() {
        Some(stdout) => forward(BufReader::new(stdout), out),
        None => Ok(()),
    };

    let status = child.wait()?;
    forwarded?;
    Ok(status.code().unwrap_or(1))
}

/// Copy lines from `reader` to `out` until EOF.
///
/// After the first failed write the remaining input is read and discarded, so
/// the child never blocks on a full pipe.
fn forward(mut reader: impl BufRead, out: &mut dyn Write) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut write_error = None;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if write_error.is_some() {
            continue;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Err(e) = write!(out, "{}", line).and_then(|()| out.flush()) {
            debug!(error = %e, "output closed, draining script output");
            write_error = Some(e);
        }
    }
    write_error.map_or(Ok(()), Err)
}

/// Single-quote `s` for `sh`, escaping embedded quotes.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
