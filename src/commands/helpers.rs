//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::config::PackConfig;
use crate::error::{PackError, Result};

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory. The result is canonical so that
/// every path handed to subprocesses is absolute.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let path = match workspace {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| PackError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };

    dunce::canonicalize(&path).map_err(|e| PackError::IoError {
        message: format!("Workspace {} is not accessible: {e}", path.display()),
    })
}

/// Resolve the workspace and load its configuration
pub fn load_context(
    workspace: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(PathBuf, PackConfig)> {
    let workspace = resolve_workspace_path(workspace)?;
    let config = PackConfig::load(&workspace, config)?;
    Ok((workspace, config))
}
