//! Error types and handling for athena-pack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`process`]: Subprocess errors
//! - [`plist`]: Property list errors

pub mod config;
pub mod plist;
pub mod process;

use miette::Diagnostic;
use thiserror::Error;

use crate::process::Step;

/// Exit status used when a program cannot be started, matching a shell's
/// "command not found".
pub const SPAWN_FAILED_EXIT_CODE: i32 = 127;

/// Offset added to the signal number of a killed subprocess
pub const SIGNAL_EXIT_CODE_BASE: i32 = 128;

/// Main error type for athena-pack operations
#[derive(Error, Diagnostic, Debug)]
pub enum PackError {
    // Subprocess errors
    #[error("{step} failed: `{program}` exited with status {status}")]
    #[diagnostic(code(athena_pack::process::failed))]
    SubprocessFailed {
        step: Step,
        program: String,
        status: i32,
    },

    #[error("{step} failed: could not start `{program}`: {reason}")]
    #[diagnostic(
        code(athena_pack::process::spawn_failed),
        help("Check that the program is installed and on PATH, or set its path in athena-pack.yaml")
    )]
    SubprocessSpawnFailed {
        step: Step,
        program: String,
        reason: String,
    },

    #[error("{step} failed: `{program}` was terminated by signal {signal}")]
    #[diagnostic(code(athena_pack::process::terminated))]
    SubprocessTerminated {
        step: Step,
        program: String,
        signal: i32,
    },

    #[error("{step} failed: `{program}` printed output that is not valid UTF-8")]
    #[diagnostic(
        code(athena_pack::process::output_not_utf8),
        help("The version is written to Info.plist verbatim and must be UTF-8 text")
    )]
    SubprocessOutputNotUtf8 { step: Step, program: String },

    // Environment errors
    #[error("Environment variable {name} is not set")]
    #[diagnostic(
        code(athena_pack::env::missing),
        help("Activate the toolchain environment that provides the plugin binary")
    )]
    EnvVarMissing { name: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(athena_pack::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(athena_pack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(athena_pack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(athena_pack::config::invalid))]
    ConfigInvalid { message: String },

    // Property list errors
    #[error("Key '{key}' already exists in {path}")]
    #[diagnostic(code(athena_pack::plist::key_exists))]
    PlistKeyExists { path: String, key: String },

    #[error("Key '{key}' not found in {path}")]
    #[diagnostic(
        code(athena_pack::plist::key_missing),
        help("The freezer's template Info.plist is expected to define this key")
    )]
    PlistKeyMissing { path: String, key: String },

    #[error("Failed to read property list: {path}: {reason}")]
    #[diagnostic(code(athena_pack::plist::read_failed))]
    PlistReadFailed { path: String, reason: String },

    #[error("Failed to write property list: {path}: {reason}")]
    #[diagnostic(code(athena_pack::plist::write_failed))]
    PlistWriteFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(athena_pack::fs::io_error))]
    IoError { message: String },
}

impl PackError {
    /// Process exit status to report for this error.
    ///
    /// A failing subprocess hands its own status through, and a signalled
    /// one reports `128 + signal` like a shell. Everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackError::SubprocessFailed { status, .. } => *status,
            PackError::SubprocessTerminated { signal, .. } => SIGNAL_EXIT_CODE_BASE + signal,
            PackError::SubprocessSpawnFailed { .. } => SPAWN_FAILED_EXIT_CODE,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PackError {
    fn from(err: serde_yaml::Error) -> Self {
        PackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        PackError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PackError>;
