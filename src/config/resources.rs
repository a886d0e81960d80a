//! Resource and plugin mappings handed to the freezer

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

/// Separator between source and destination in `--add-data` and
/// `--add-binary` values. PyInstaller uses the platform path-list separator.
pub const MAPPING_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// A data file or directory bundled into the frozen application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceMapping {
    /// Path relative to the workspace
    pub source: String,

    /// Destination directory inside the bundle
    pub dest: String,
}

impl ResourceMapping {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Render as a freezer mapping value (`source:dest`)
    pub fn to_arg(&self) -> String {
        format!("{}{}{}", self.source, MAPPING_SEPARATOR, self.dest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(config_error::invalid("resource source cannot be empty"));
        }
        if self.dest.trim().is_empty() {
            return Err(config_error::invalid(format!(
                "resource '{}' has an empty destination",
                self.source
            )));
        }
        Ok(())
    }
}

/// The six resource directories Athena ships with
pub fn default_resources() -> Vec<ResourceMapping> {
    vec![
        ResourceMapping::new("src/athena/qml", "athena/qml"),
        ResourceMapping::new("tools", "tools"),
        ResourceMapping::new("sample_inputs", "sample_inputs"),
        ResourceMapping::new("ui", "ui"),
        ResourceMapping::new("src/athena/shaders", "athena/shaders"),
        ResourceMapping::new("src/athena/txt", "athena/txt"),
    ]
}

/// Third-party plugin binary located through a toolchain environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Environment variable naming the toolchain root
    pub env_var: String,

    /// Path of the binary relative to the toolchain root
    pub path: String,

    /// Plugin discovery directory inside the bundle
    pub dest: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            env_var: "CONDA_PREFIX".to_string(),
            path: "plugins/geometryloaders/libdefaultgeometryloader.dylib".to_string(),
            dest: "PySide2/Qt/plugins/geometryloaders".to_string(),
        }
    }
}

impl PluginConfig {
    /// Absolute location of the plugin under the given toolchain root
    pub fn locate(&self, toolchain_root: &Path) -> PathBuf {
        toolchain_root.join(&self.path)
    }

    /// Resolve the toolchain root through `lookup` and render the
    /// `--add-binary` value.
    pub fn to_arg<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let root = lookup(&self.env_var).ok_or_else(|| config_error::env_missing(&self.env_var))?;
        Ok(format!(
            "{}{}{}",
            self.locate(&root).display(),
            MAPPING_SEPARATOR,
            self.dest
        ))
    }
}
