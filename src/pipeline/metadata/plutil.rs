//! External `plutil` editor

use std::path::{Path, PathBuf};

use super::PlistEditor;
use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec, Step};

/// Edits through the system property list tool
pub struct Plutil<'a> {
    program: String,
    workspace: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> Plutil<'a> {
    /// `plutil` runs with `workspace` as its working directory
    pub fn new(
        program: impl Into<String>,
        workspace: &Path,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            program: program.into(),
            workspace: workspace.to_path_buf(),
            runner,
        }
    }

    /// `plutil -insert KEY -bool true|false FILE`
    pub fn insert_bool_command(&self, plist: &Path, key: &str, value: bool) -> CommandSpec {
        self.command()
            .args(["-insert", key, "-bool", if value { "true" } else { "false" }])
            .arg(plist.display().to_string())
    }

    /// `plutil -replace KEY -string VALUE FILE`
    pub fn replace_string_command(&self, plist: &Path, key: &str, value: &str) -> CommandSpec {
        self.command()
            .args(["-replace", key, "-string", value])
            .arg(plist.display().to_string())
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(Step::PlistEditor, &self.program, &self.workspace)
    }
}

impl PlistEditor for Plutil<'_> {
    fn insert_bool(&self, plist: &Path, key: &str, value: bool) -> Result<()> {
        self.runner.run(&self.insert_bool_command(plist, key, value))
    }

    fn replace_string(&self, plist: &Path, key: &str, value: &str) -> Result<()> {
        self.runner.run(&self.replace_string_command(plist, key, value))
    }

    fn name(&self) -> &'static str {
        "plutil"
    }
}
