//! Subprocess errors

use super::PackError;
use crate::process::Step;

/// Creates an error for a subprocess that exited unsuccessfully
pub fn failed(step: Step, program: impl Into<String>, status: i32) -> PackError {
    PackError::SubprocessFailed {
        step,
        program: program.into(),
        status,
    }
}

/// Creates an error for a subprocess that could not be started
pub fn spawn_failed(step: Step, program: impl Into<String>, reason: impl Into<String>) -> PackError {
    PackError::SubprocessSpawnFailed {
        step,
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a subprocess killed by a signal
pub fn terminated(step: Step, program: impl Into<String>, signal: i32) -> PackError {
    PackError::SubprocessTerminated {
        step,
        program: program.into(),
        signal,
    }
}

/// Creates an error for captured output that is not UTF-8
pub fn output_not_utf8(step: Step, program: impl Into<String>) -> PackError {
    PackError::SubprocessOutputNotUtf8 {
        step,
        program: program.into(),
    }
}
