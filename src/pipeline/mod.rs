//! Packaging pipeline
//!
//! ```text
//! START → VERSION_RESOLVED → BUNDLED → METADATA_PATCHED
//!   any failure → FAILED
//! ```
//!
//! Steps run strictly in order and the first error aborts the run. Nothing
//! is retried or cleaned up after a failure.

pub mod freezer;
pub mod metadata;
pub mod version;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PackConfig;
use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};
use crate::ui;

use freezer::FreezerInvocation;
use metadata::{MetadataEdit, PlistEditor};
use version::ResolvedVersion;

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    VersionResolved,
    Bundled,
    MetadataPatched,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::MetadataPatched | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "START",
            Stage::VersionResolved => "VERSION_RESOLVED",
            Stage::Bundled => "BUNDLED",
            Stage::MetadataPatched => "METADATA_PATCHED",
            Stage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub version: ResolvedVersion,
    pub bundle_path: PathBuf,
    pub info_plist: PathBuf,
}

/// Options for a pipeline run
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Arguments appended verbatim to the freezer command line
    pub passthrough: Vec<String>,

    /// Remove the previous bundle before freezing
    pub clean: bool,
}

/// The three-step packaging pipeline
pub struct Pipeline<'a> {
    workspace: &'a Path,
    config: &'a PackConfig,
    runner: &'a dyn CommandRunner,
    editor: &'a dyn PlistEditor,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        workspace: &'a Path,
        config: &'a PackConfig,
        runner: &'a dyn CommandRunner,
        editor: &'a dyn PlistEditor,
    ) -> Self {
        Self {
            workspace,
            config,
            runner,
            editor,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every step; `lookup` resolves environment variables for the
    /// freezer.
    pub fn run<F>(&mut self, options: &BuildOptions, lookup: F) -> Result<BuildReport>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        match self.run_steps(options, lookup) {
            Ok(report) => {
                debug_assert!(self.stage.is_terminal());
                Ok(report)
            }
            Err(e) => {
                tracing::info!(from = %self.stage, "pipeline failed: {e}");
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    fn run_steps<F>(&mut self, options: &BuildOptions, lookup: F) -> Result<BuildReport>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        ui::step("Resolving version");
        let version = version::resolve(&self.config.version, self.workspace, self.runner)?;
        if version.ran_preflight {
            ui::detail(&format!("ran preflight {}", self.config.version.preflight));
        }
        ui::detail(&format!("version {}", version.version));
        self.advance(Stage::VersionResolved);

        ui::step("Freezing application");
        let invocation =
            FreezerInvocation::from_config(self.config, self.workspace, &options.passthrough, lookup)?;
        if options.clean {
            remove_previous_bundle(&invocation.bundle_path)?;
        }
        invocation.run(self.runner)?;
        self.advance(Stage::Bundled);

        ui::step("Patching bundle metadata");
        let info_plist = self.config.info_plist_path(self.workspace);
        metadata::patch(
            self.editor,
            &info_plist,
            &MetadataEdit::for_version(&version.version),
        )?;
        self.advance(Stage::MetadataPatched);

        Ok(BuildReport {
            version,
            bundle_path: invocation.bundle_path,
            info_plist,
        })
    }

    fn advance(&mut self, next: Stage) {
        tracing::info!(from = %self.stage, to = %next, "pipeline transition");
        self.stage = next;
    }
}

fn remove_previous_bundle(bundle: &Path) -> Result<()> {
    if bundle.exists() {
        tracing::info!(bundle = %bundle.display(), "removing previous bundle");
        std::fs::remove_dir_all(bundle)?;
    }
    Ok(())
}

/// What a build would do, without running anything
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub workspace: PathBuf,
    pub preflight: Option<CommandSpec>,
    pub version: CommandSpec,
    pub freezer: CommandSpec,
    pub bundle: PathBuf,
    pub info_plist: PathBuf,
    pub editor: &'static str,
    pub edits: Vec<MetadataEdit>,
}

impl Plan {
    pub fn build<F>(
        workspace: &Path,
        config: &PackConfig,
        passthrough: &[String],
        editor: &dyn PlistEditor,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let preflight = version::needs_preflight(&config.version, workspace)
            .then(|| version::preflight_command(&config.version, workspace));
        let invocation = FreezerInvocation::from_config(config, workspace, passthrough, lookup)?;

        Ok(Self {
            workspace: workspace.to_path_buf(),
            preflight,
            version: version::generator_command(&config.version, workspace),
            freezer: invocation.command,
            bundle: invocation.bundle_path,
            info_plist: config.info_plist_path(workspace),
            editor: editor.name(),
            edits: MetadataEdit::for_version("<version>"),
        })
    }
}
