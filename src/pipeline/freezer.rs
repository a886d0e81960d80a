//! Freezer invocation
//!
//! Builds the PyInstaller command line from the packaging configuration.
//! Argument order: data mappings, plugin binary, bundle metadata, the
//! windowed flag, an optional dist path, the entry point, and finally the
//! caller's pass-through arguments.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_DIST_DIR, PackConfig};
use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec, Step};

/// A ready-to-run freezer command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezerInvocation {
    pub command: CommandSpec,
    pub bundle_path: PathBuf,
}

impl FreezerInvocation {
    /// Build the invocation.
    ///
    /// `lookup` resolves environment variables; the plugin binary is
    /// located under the directory it returns.
    pub fn from_config<F>(
        config: &PackConfig,
        workspace: &Path,
        passthrough: &[String],
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let mut command = CommandSpec::new(Step::Freezer, &config.freezer, workspace);

        for mapping in config.data_mappings() {
            command = command.arg("--add-data").arg(mapping.to_arg());
        }
        command = command
            .arg("--add-binary")
            .arg(config.plugin.to_arg(lookup)?);

        command = command
            .arg("--osx-bundle-identifier")
            .arg(&config.bundle_identifier)
            .arg("--name")
            .arg(&config.name)
            .arg("--icon")
            .arg(&config.icon);

        if config.windowed {
            command = command.arg("--windowed");
        }
        if config.dist_dir != DEFAULT_DIST_DIR {
            command = command.arg("--distpath").arg(&config.dist_dir);
        }

        command = command
            .arg(&config.entry_point)
            .args(passthrough.iter().cloned());

        Ok(Self {
            command,
            bundle_path: config.bundle_path(workspace),
        })
    }

    pub fn run(&self, runner: &dyn CommandRunner) -> Result<()> {
        tracing::info!(bundle = %self.bundle_path.display(), "freezing application");
        runner.run(&self.command)
    }
}

/// Environment lookup used outside tests. A variable set to the empty
/// string counts as unset.
pub fn process_env(name: &str) -> Option<PathBuf> {
    non_empty(std::env::var_os(name))
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceMapping;
    use crate::error::PackError;
    use crate::process::fake::RecordingRunner;

    fn conda(name: &str) -> Option<PathBuf> {
        (name == "CONDA_PREFIX").then(|| PathBuf::from("/opt/conda"))
    }

    fn invocation(config: &PackConfig, passthrough: &[&str]) -> FreezerInvocation {
        let passthrough: Vec<String> = passthrough.iter().map(|s| (*s).to_string()).collect();
        FreezerInvocation::from_config(config, Path::new("/work"), &passthrough, conda).unwrap()
    }

    fn values_after<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
        args.windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }

    #[test]
    fn test_every_resource_and_version_file_is_mapped() {
        let config = PackConfig::default();
        let inv = invocation(&config, &[]);
        let data = values_after(&inv.command.args, "--add-data");

        assert_eq!(data.len(), 7);
        for mapping in config.data_mappings() {
            assert!(data.contains(&mapping.to_arg().as_str()), "missing {mapping:?}");
        }
        let version_file = config.version.resource().to_arg();
        assert_eq!(data.last().copied(), Some(version_file.as_str()));
        assert!(version_file.starts_with("src/athena/version.py"));
    }

    #[test]
    fn test_plugin_binary_and_metadata() {
        let inv = invocation(&PackConfig::default(), &[]);
        let args = &inv.command.args;

        let binaries = values_after(args, "--add-binary");
        assert_eq!(binaries.len(), 1);
        assert!(binaries[0].contains("libdefaultgeometryloader.dylib"));
        assert!(binaries[0].ends_with("PySide2/Qt/plugins/geometryloaders"));

        assert_eq!(values_after(args, "--osx-bundle-identifier"), vec!["edu.mit.lcbb.athena"]);
        assert_eq!(values_after(args, "--name"), vec!["Athena"]);
        assert_eq!(values_after(args, "--icon"), vec!["athena.icns"]);
        assert!(args.iter().any(|a| a == "--windowed"));
        assert!(!args.iter().any(|a| a == "--distpath"));
        assert_eq!(inv.command.program, "pyinstaller");
        assert_eq!(inv.command.cwd, Path::new("/work"));
    }

    #[test]
    fn test_passthrough_appended_verbatim_in_order() {
        let inv = invocation(
            &PackConfig::default(),
            &["--log-level", "DEBUG", "--noconfirm", "a b"],
        );
        let args = &inv.command.args;
        let tail = &args[args.len() - 5..];
        assert_eq!(tail, ["src/athena.py", "--log-level", "DEBUG", "--noconfirm", "a b"]);
    }

    #[test]
    fn test_entry_point_last_without_passthrough() {
        let inv = invocation(&PackConfig::default(), &[]);
        assert_eq!(inv.command.args.last().map(String::as_str), Some("src/athena.py"));
    }

    #[test]
    fn test_console_build_and_custom_dist() {
        let config = PackConfig {
            windowed: false,
            dist_dir: "out".to_string(),
            resources: vec![ResourceMapping::new("assets", "assets")],
            ..PackConfig::default()
        };
        let inv = invocation(&config, &[]);
        assert!(!inv.command.args.iter().any(|a| a == "--windowed"));
        assert_eq!(values_after(&inv.command.args, "--distpath"), vec!["out"]);
        assert_eq!(inv.bundle_path, Path::new("/work/out/Athena.app"));
    }

    #[test]
    fn test_missing_toolchain_env() {
        let err = FreezerInvocation::from_config(
            &PackConfig::default(),
            Path::new("/work"),
            &[],
            |_| None,
        )
        .unwrap_err();
        assert!(matches!(err, PackError::EnvVarMissing { .. }));
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        assert_eq!(non_empty(Some(OsString::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some(OsString::from("/opt/conda"))),
            Some(PathBuf::from("/opt/conda"))
        );
    }

    #[test]
    fn test_run_propagates_failure() {
        let inv = invocation(&PackConfig::default(), &[]);
        let runner = RecordingRunner::new().failing(Step::Freezer, 9);
        let err = inv.run(&runner).unwrap_err();
        assert_eq!(err.exit_code(), 9);
        assert_eq!(runner.count(Step::Freezer), 1);
    }
}
