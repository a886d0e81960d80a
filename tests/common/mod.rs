//! Common test utilities for athena-pack integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Info.plist as a freezer leaves it: short version present, no
/// high-resolution flag
pub const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleExecutable</key>
	<string>Athena</string>
	<key>CFBundleIdentifier</key>
	<string>edu.mit.lcbb.athena</string>
	<key>CFBundleShortVersionString</key>
	<string>0.0.0</string>
</dict>
</plist>
"#;

/// athena-pack command with a clean environment
#[allow(deprecated)]
pub fn athena_pack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("athena-pack").unwrap();
    cmd.env_remove("ATHENA_PACK_WORKSPACE");
    cmd.env_remove("RUST_LOG");
    cmd.env("CONDA_PREFIX", "/opt/conda");
    cmd
}

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write an executable shell script in workspace and return its absolute path
    #[cfg(unix)]
    pub fn write_script(&self, path: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, &format!("#!/bin/sh\n{body}\n"));
        let file_path = self.path.join(path);
        std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        file_path
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Lines of a file, or empty when the file does not exist
    pub fn read_lines(&self, path: &str) -> Vec<String> {
        if !self.file_exists(path) {
            return Vec::new();
        }
        self.read_file(path).lines().map(str::to_string).collect()
    }

    /// Create the six stock resource directories
    pub fn create_resources(&self) {
        for dir in [
            "src/athena/qml",
            "tools",
            "sample_inputs",
            "ui",
            "src/athena/shaders",
            "src/athena/txt",
        ] {
            std::fs::create_dir_all(self.path.join(dir)).expect("Failed to create resource dir");
        }
    }

    /// Generator that prints `output` (written with printf, so include `\n`)
    #[cfg(unix)]
    pub fn write_generator(&self, output: &str) {
        self.write_file("version.sh", &format!("printf '{output}'\n"));
    }

    /// Preflight that logs each run and creates a generator printing `output`
    #[cfg(unix)]
    pub fn write_preflight(&self, output: &str) {
        self.write_file(
            "preflight.sh",
            &format!("echo ran >> preflight.log\ncat > version.sh <<'GEN'\nprintf '{output}'\nGEN\n"),
        );
    }

    /// Freezer that records its argv and lays down the template Info.plist
    #[cfg(unix)]
    pub fn write_freezer(&self) -> PathBuf {
        self.write_script(
            "fake-freezer.sh",
            &format!(
                "printf '%s\\n' \"$@\" > freezer-args.txt\n\
                 mkdir -p dist/Athena.app/Contents\n\
                 cat > dist/Athena.app/Contents/Info.plist <<'PLIST'\n{INFO_PLIST_TEMPLATE}PLIST"
            ),
        )
    }

    /// Freezer that fails with `status` without producing anything
    #[cfg(unix)]
    pub fn write_failing_freezer(&self, status: i32) -> PathBuf {
        self.write_script(
            "fake-freezer.sh",
            &format!("printf '%s\\n' \"$@\" > freezer-args.txt\nexit {status}"),
        )
    }

    /// athena-pack.yaml wiring the fakes: `sh` runs version.sh/preflight.sh,
    /// the given freezer, and the given metadata section
    pub fn write_config(&self, freezer: &Path, metadata: &str) {
        self.write_file(
            "athena-pack.yaml",
            &format!(
                "freezer: {}\n\
                 version:\n  interpreter: sh\n  generator: version.sh\n  preflight: preflight.sh\n\
                 {metadata}",
                freezer.display()
            ),
        );
    }

    pub fn info_plist(&self) -> PathBuf {
        self.path.join("dist/Athena.app/Contents/Info.plist")
    }

    /// Parsed Info.plist dictionary
    pub fn read_info_plist(&self) -> plist::Dictionary {
        plist::Value::from_file(self.info_plist())
            .expect("Failed to parse Info.plist")
            .into_dictionary()
            .expect("Info.plist root is not a dictionary")
    }
}
