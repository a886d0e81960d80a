//! Bundle metadata patching
//!
//! Two edits are applied to the frozen bundle's `Info.plist`, in order:
//! insert `NSHighResolutionCapable = true`, then replace
//! `CFBundleShortVersionString` with the resolved version.

mod native;
mod plutil;

pub use native::NativePlist;
pub use plutil::Plutil;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::{EditorKind, MetadataConfig};
use crate::error::Result;
use crate::process::CommandRunner;

pub const HIGH_RESOLUTION_KEY: &str = "NSHighResolutionCapable";
pub const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

/// Edits a property list file in place
pub trait PlistEditor {
    /// Add a boolean key; fails if the key already exists
    fn insert_bool(&self, plist: &Path, key: &str, value: bool) -> Result<()>;

    /// Overwrite a string key; fails if the key is absent
    fn replace_string(&self, plist: &Path, key: &str, value: &str) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// A single key upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum MetadataEdit {
    InsertBool { key: String, value: bool },
    ReplaceString { key: String, value: String },
}

impl MetadataEdit {
    /// The edits applied after every successful freeze
    pub fn for_version(version: &str) -> Vec<MetadataEdit> {
        vec![
            MetadataEdit::InsertBool {
                key: HIGH_RESOLUTION_KEY.to_string(),
                value: true,
            },
            MetadataEdit::ReplaceString {
                key: SHORT_VERSION_KEY.to_string(),
                value: version.to_string(),
            },
        ]
    }

    pub fn apply(&self, editor: &dyn PlistEditor, plist: &Path) -> Result<()> {
        tracing::debug!(editor = editor.name(), "{self}");
        match self {
            MetadataEdit::InsertBool { key, value } => editor.insert_bool(plist, key, *value),
            MetadataEdit::ReplaceString { key, value } => editor.replace_string(plist, key, value),
        }
    }
}

impl fmt::Display for MetadataEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataEdit::InsertBool { key, value } => write!(f, "insert {key} = {value}"),
            MetadataEdit::ReplaceString { key, value } => write!(f, "replace {key} = \"{value}\""),
        }
    }
}

/// Apply edits in order, stopping at the first failure
pub fn patch(editor: &dyn PlistEditor, plist: &Path, edits: &[MetadataEdit]) -> Result<()> {
    tracing::info!(plist = %plist.display(), editor = editor.name(), "patching bundle metadata");
    for edit in edits {
        edit.apply(editor, plist)?;
    }
    Ok(())
}

/// Build the editor selected by configuration
pub fn editor_for<'a>(
    config: &MetadataConfig,
    workspace: &Path,
    runner: &'a dyn CommandRunner,
) -> Box<dyn PlistEditor + 'a> {
    match config.editor.resolve() {
        EditorKind::Plutil => Box::new(Plutil::new(&config.plutil, workspace, runner)),
        EditorKind::Native | EditorKind::Auto => Box::new(NativePlist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::plist as plist_error;
    use crate::process::fake::RecordingRunner;
    use std::cell::RefCell;

    /// Editor that records calls and can fail on a given key
    #[derive(Default)]
    struct ScriptedEditor {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl ScriptedEditor {
        fn record(&self, plist: &Path, key: &str, call: String) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.fail_on == Some(key) {
                return Err(plist_error::key_missing(plist.display().to_string(), key));
            }
            Ok(())
        }
    }

    impl PlistEditor for ScriptedEditor {
        fn insert_bool(&self, plist: &Path, key: &str, value: bool) -> Result<()> {
            self.record(plist, key, format!("insert {key} {value}"))
        }

        fn replace_string(&self, plist: &Path, key: &str, value: &str) -> Result<()> {
            self.record(plist, key, format!("replace {key} {value}"))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[test]
    fn test_edits_for_version() {
        let edits = MetadataEdit::for_version("3.2.1");
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].to_string(), "insert NSHighResolutionCapable = true");
        assert_eq!(
            edits[1].to_string(),
            "replace CFBundleShortVersionString = \"3.2.1\""
        );
    }

    #[test]
    fn test_patch_applies_in_order() {
        let editor = ScriptedEditor::default();
        patch(&editor, Path::new("Info.plist"), &MetadataEdit::for_version("1.0")).unwrap();
        assert_eq!(
            *editor.calls.borrow(),
            vec![
                "insert NSHighResolutionCapable true",
                "replace CFBundleShortVersionString 1.0"
            ]
        );
    }

    #[test]
    fn test_patch_stops_at_first_failure() {
        let editor = ScriptedEditor {
            fail_on: Some(HIGH_RESOLUTION_KEY),
            ..ScriptedEditor::default()
        };
        let result = patch(&editor, Path::new("Info.plist"), &MetadataEdit::for_version("1.0"));
        assert!(result.is_err());
        assert_eq!(editor.calls.borrow().len(), 1);
    }

    #[test]
    fn test_editor_for_explicit_kinds() {
        let runner = RecordingRunner::new();
        let native = MetadataConfig {
            editor: EditorKind::Native,
            ..MetadataConfig::default()
        };
        assert_eq!(editor_for(&native, Path::new("/work"), &runner).name(), "native");

        let plutil = MetadataConfig {
            editor: EditorKind::Plutil,
            ..MetadataConfig::default()
        };
        assert_eq!(editor_for(&plutil, Path::new("/work"), &runner).name(), "plutil");
    }

    #[test]
    fn test_edit_serializes_with_op_tag() {
        let json = serde_json::to_value(&MetadataEdit::for_version("2.0")[1]).unwrap();
        assert_eq!(json["op"], "replace-string");
        assert_eq!(json["key"], SHORT_VERSION_KEY);
        assert_eq!(json["value"], "2.0");
    }
}
