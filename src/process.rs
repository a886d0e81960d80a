//! Subprocess execution
//!
//! Every external tool the pipeline touches (interpreter, freezer, plist
//! editor) goes through a [`CommandRunner`]. Failures are never retried:
//! a non-zero exit becomes [`PackError::SubprocessFailed`] carrying the
//! child's status so `main` can exit with it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;

use crate::error::{PackError, Result, process as process_error};

/// Pipeline step a subprocess belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Preflight,
    VersionGenerator,
    Freezer,
    PlistEditor,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Preflight => "preflight",
            Step::VersionGenerator => "version generator",
            Step::Freezer => "freezer",
            Step::PlistEditor => "plist editor",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(step: Step, program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program plus arguments, space separated, for logs and plans.
    /// Arguments containing whitespace are single-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.is_empty() || part.chars().any(char::is_whitespace) {
                    format!("'{part}'")
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.cwd);
        cmd
    }
}

/// Runs subprocesses on behalf of the pipeline
pub trait CommandRunner {
    /// Run with inherited stdio and fail on a non-zero exit.
    fn run(&self, cmd: &CommandSpec) -> Result<()>;

    /// Run with stdout captured and fail on a non-zero exit.
    /// Returns stdout untouched; output that is not UTF-8 is an error.
    fn capture(&self, cmd: &CommandSpec) -> Result<String>;
}

/// Runner that spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<()> {
        tracing::debug!(step = %cmd.step, cwd = %cmd.cwd.display(), "running {}", cmd.command_line());

        let status = cmd
            .to_command()
            .status()
            .map_err(|e| process_error::spawn_failed(cmd.step, &cmd.program, e.to_string()))?;

        check_status(cmd, status)
    }

    fn capture(&self, cmd: &CommandSpec) -> Result<String> {
        tracing::debug!(step = %cmd.step, cwd = %cmd.cwd.display(), "capturing {}", cmd.command_line());

        let output = cmd
            .to_command()
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| process_error::spawn_failed(cmd.step, &cmd.program, e.to_string()))?;

        check_status(cmd, output.status)?;
        String::from_utf8(output.stdout)
            .map_err(|_| process_error::output_not_utf8(cmd.step, &cmd.program))
    }
}

fn check_status(cmd: &CommandSpec, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    let err: PackError = match (status.code(), terminating_signal(status)) {
        (Some(code), _) => process_error::failed(cmd.step, &cmd.program, code),
        (None, Some(signal)) => process_error::terminated(cmd.step, &cmd.program, signal),
        (None, None) => process_error::failed(cmd.step, &cmd.program, 1),
    };
    tracing::debug!(step = %cmd.step, "subprocess failed: {err}");
    Err(err)
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}
