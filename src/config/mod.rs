//! Packaging configuration (athena-pack.yaml)
//!
//! Every field is optional. The defaults describe the stock Athena build,
//! so a workspace without a config file packages exactly that.

mod resources;

pub use resources::{PluginConfig, ResourceMapping, default_resources};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

/// Default config file name, looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "athena-pack.yaml";

/// Output directory the freezer uses when not told otherwise
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Packaging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Application name, used for the bundle directory (`<name>.app`)
    pub name: String,

    /// macOS bundle identifier
    pub bundle_identifier: String,

    /// Icon resource relative to the workspace
    pub icon: String,

    /// Application entry-point script
    pub entry_point: String,

    /// Build without a console window
    pub windowed: bool,

    /// Freezer output directory
    pub dist_dir: String,

    /// Freezer program
    pub freezer: String,

    pub version: VersionConfig,

    /// Resource directories, bundled in declared order
    pub resources: Vec<ResourceMapping>,

    pub plugin: PluginConfig,

    pub metadata: MetadataConfig,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            name: "Athena".to_string(),
            bundle_identifier: "edu.mit.lcbb.athena".to_string(),
            icon: "athena.icns".to_string(),
            entry_point: "src/athena.py".to_string(),
            windowed: true,
            dist_dir: DEFAULT_DIST_DIR.to_string(),
            freezer: "pyinstaller".to_string(),
            version: VersionConfig::default(),
            resources: default_resources(),
            plugin: PluginConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

/// How the version string is produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Interpreter that runs both the preflight and the generator
    pub interpreter: String,

    /// Version generator script; prints the version on stdout
    pub generator: String,

    /// Preflight script that creates the generator when it is missing
    pub preflight: String,

    /// Destination of the generator file inside the bundle
    pub bundle_into: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            generator: "src/athena/version.py".to_string(),
            preflight: "setup.py".to_string(),
            bundle_into: "athena".to_string(),
        }
    }
}

impl VersionConfig {
    /// Mapping that bundles the generator file itself
    pub fn resource(&self) -> ResourceMapping {
        ResourceMapping::new(&self.generator, &self.bundle_into)
    }
}

/// Which property list editor patches Info.plist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    /// `plutil` on macOS, the in-process editor elsewhere
    #[default]
    Auto,
    Plutil,
    Native,
}

impl EditorKind {
    /// Resolve `Auto` for the current platform
    pub fn resolve(self) -> EditorKind {
        match self {
            EditorKind::Auto if cfg!(target_os = "macos") => EditorKind::Plutil,
            EditorKind::Auto => EditorKind::Native,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    pub editor: EditorKind,

    /// External property list editor program
    pub plutil: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            editor: EditorKind::Auto,
            plutil: "plutil".to_string(),
        }
    }
}

impl PackConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration for a workspace.
    ///
    /// An explicit path must exist. Without one, `athena-pack.yaml` in the
    /// workspace root is used when present and defaults apply otherwise.
    pub fn load(workspace: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                let path = workspace.join(path);
                if !path.is_file() {
                    return Err(config_error::not_found(path.display().to_string()));
                }
                path
            }
            None => {
                let path = workspace.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!("no {CONFIG_FILE_NAME} in workspace, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        tracing::debug!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(&path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::PackError::ConfigParseFailed { reason, .. } => {
                config_error::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(config_error::invalid("name cannot be empty"));
        }
        if self.entry_point.trim().is_empty() {
            return Err(config_error::invalid("entry_point cannot be empty"));
        }
        if self.freezer.trim().is_empty() {
            return Err(config_error::invalid("freezer cannot be empty"));
        }
        if self.version.generator.trim().is_empty() {
            return Err(config_error::invalid("version.generator cannot be empty"));
        }
        for resource in &self.resources {
            resource.validate()?;
        }
        Ok(())
    }

    /// All `--add-data` mappings: declared resources, then the version file
    pub fn data_mappings(&self) -> Vec<ResourceMapping> {
        let mut mappings = self.resources.clone();
        mappings.push(self.version.resource());
        mappings
    }

    /// `<workspace>/<dist>/<name>.app`
    pub fn bundle_path(&self, workspace: &Path) -> PathBuf {
        workspace
            .join(&self.dist_dir)
            .join(format!("{}.app", self.name))
    }

    /// `<bundle>/Contents/Info.plist`
    pub fn info_plist_path(&self, workspace: &Path) -> PathBuf {
        self.bundle_path(workspace).join("Contents").join("Info.plist")
    }
}
