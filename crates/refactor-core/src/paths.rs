use crate::domain::{RefactorError, RefactorResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

pub fn current_working_dir() -> RefactorResult<PathBuf> {
    std::env::current_dir().map_err(|source| {
        RefactorError::internal(
            "SYS.CURRENT_DIR",
            format!("failed to read current working directory: {}", source),
        )
    })
}

/// Resolves the project root and explicit config file against `cwd`.
///
/// Both results are canonical absolute paths that existed when this ran.
/// Without a config option no path is produced; discovery happens later
/// under the root.
pub fn resolve_paths(
    cwd: &Path,
    root: Option<&str>,
    config: Option<&str>,
) -> RefactorResult<ResolvedPaths> {
    let root = match root {
        Some(raw) => resolve_root(cwd, raw)?,
        None => fs::canonicalize(cwd).map_err(|source| {
            RefactorError::path(
                "PATH.WORKING_DIR",
                format!(
                    "Could not resolve working directory '{}': {}",
                    cwd.display(),
                    source
                ),
            )
        })?,
    };

    let config = config.map(|raw| resolve_config(cwd, raw)).transpose()?;

    Ok(ResolvedPaths { root, config })
}

fn resolve_root(cwd: &Path, raw: &str) -> RefactorResult<PathBuf> {
    let resolved = fs::canonicalize(cwd.join(raw)).map_err(|_| {
        RefactorError::path(
            "PATH.ROOT_NOT_FOUND",
            format!(
                "Could not locate root directory '{}' from working directory '{}'",
                raw,
                cwd.display()
            ),
        )
    })?;

    if !resolved.is_dir() {
        return Err(RefactorError::path(
            "PATH.ROOT_NOT_DIRECTORY",
            format!(
                "Root '{}' resolves to '{}', which is not a directory",
                raw,
                resolved.display()
            ),
        ));
    }

    Ok(resolved)
}

fn resolve_config(cwd: &Path, raw: &str) -> RefactorResult<PathBuf> {
    fs::canonicalize(cwd.join(raw)).map_err(|_| {
        RefactorError::path(
            "PATH.CONFIG_NOT_FOUND",
            format!("Could not resolve path to config {}", raw),
        )
    })
}
