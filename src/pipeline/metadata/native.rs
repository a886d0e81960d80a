//! In-process property list editor built on the `plist` crate.
//!
//! Mirrors `plutil` semantics for the two operations the pipeline needs and
//! keeps the file's original encoding (XML or binary). Writes go through a
//! temp file in the same directory and are renamed over the original.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use plist::{Dictionary, Value};
use tempfile::NamedTempFile;

use super::PlistEditor;
use crate::error::{Result, plist as plist_error};

const BINARY_MAGIC: &[u8] = b"bplist00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Xml,
    Binary,
}

/// Edits Info.plist without spawning a process
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlist;

impl NativePlist {
    fn edit<F>(plist: &Path, f: F) -> Result<()>
    where
        F: FnOnce(&mut Dictionary) -> Result<()>,
    {
        let display = plist.display().to_string();
        let bytes = fs::read(plist).map_err(|e| plist_error::read_failed(&display, e.to_string()))?;
        let encoding = if bytes.starts_with(BINARY_MAGIC) {
            Encoding::Binary
        } else {
            Encoding::Xml
        };

        let mut value = Value::from_reader(Cursor::new(&bytes))
            .map_err(|e| plist_error::read_failed(&display, e.to_string()))?;
        let dict = value
            .as_dictionary_mut()
            .ok_or_else(|| plist_error::read_failed(&display, "root is not a dictionary"))?;

        f(dict)?;

        write_atomic(plist, &value, encoding)
    }
}

fn write_atomic(plist: &Path, value: &Value, encoding: Encoding) -> Result<()> {
    let display = plist.display().to_string();
    let write_err = |reason: String| plist_error::write_failed(&display, reason);

    let dir = plist
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;

    match encoding {
        Encoding::Xml => value.to_writer_xml(&mut tmp),
        Encoding::Binary => value.to_writer_binary(&mut tmp),
    }
    .map_err(|e| write_err(e.to_string()))?;

    // NamedTempFile is created 0600; keep the original mode
    let permissions = fs::metadata(plist)
        .map_err(|e| write_err(e.to_string()))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| write_err(e.to_string()))?;

    tmp.persist(plist).map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}

impl PlistEditor for NativePlist {
    fn insert_bool(&self, plist: &Path, key: &str, value: bool) -> Result<()> {
        Self::edit(plist, |dict| {
            if dict.contains_key(key) {
                return Err(plist_error::key_exists(plist.display().to_string(), key));
            }
            dict.insert(key.to_string(), Value::Boolean(value));
            Ok(())
        })
    }

    fn replace_string(&self, plist: &Path, key: &str, value: &str) -> Result<()> {
        Self::edit(plist, |dict| {
            if !dict.contains_key(key) {
                return Err(plist_error::key_missing(plist.display().to_string(), key));
            }
            dict.insert(key.to_string(), Value::String(value.to_string()));
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
