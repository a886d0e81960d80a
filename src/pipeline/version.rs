//! Version resolution
//!
//! Makes sure the version generator script exists (running the preflight
//! step when it does not) and captures the version it prints.

use std::path::Path;

use serde::Serialize;

use crate::config::VersionConfig;
use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec, Step};

/// Outcome of version resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    /// Generator stdout with surrounding whitespace removed
    pub version: String,

    /// Whether the preflight step had to run
    pub ran_preflight: bool,
}

/// Preflight command: `<interpreter> <preflight>`
pub fn preflight_command(config: &VersionConfig, workspace: &Path) -> CommandSpec {
    CommandSpec::new(Step::Preflight, &config.interpreter, workspace).arg(&config.preflight)
}

/// Generator command: `<interpreter> <generator>`
pub fn generator_command(config: &VersionConfig, workspace: &Path) -> CommandSpec {
    CommandSpec::new(Step::VersionGenerator, &config.interpreter, workspace)
        .arg(&config.generator)
}

/// True when the generator script is missing and the preflight must run
pub fn needs_preflight(config: &VersionConfig, workspace: &Path) -> bool {
    !workspace.join(&config.generator).exists()
}

/// Resolve the version string.
///
/// The generator runs whether or not the preflight did. If the preflight
/// did not produce the generator, the generator invocation fails and that
/// failure propagates as is.
pub fn resolve(
    config: &VersionConfig,
    workspace: &Path,
    runner: &dyn CommandRunner,
) -> Result<ResolvedVersion> {
    let ran_preflight = needs_preflight(config, workspace);
    if ran_preflight {
        tracing::info!(
            generator = %config.generator,
            "version generator missing, running preflight {}",
            config.preflight
        );
        runner.run(&preflight_command(config, workspace))?;
    }

    let stdout = runner.capture(&generator_command(config, workspace))?;
    let version = stdout.trim().to_string();
    if version.is_empty() {
        tracing::warn!("version generator printed nothing; CFBundleShortVersionString will be empty");
    }

    Ok(ResolvedVersion {
        version,
        ran_preflight,
    })
}
