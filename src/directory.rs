//! Directory listing used for structure discovery.
//!
//! Every listing is sorted by file name so that frame order and discovery
//! order are stable across platforms.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PandasetError;

/// Lists the immediate subdirectories of `root`, sorted by name.
pub fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, PandasetError> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| PandasetError::LayoutInvalid {
            path: root.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

/// Lists the files directly inside `dir` whose extension matches one of
/// `extensions` (case-insensitive), sorted by file name.
///
/// The sort is the only definition of frame order.
pub fn files_with_extensions(
    dir: &Path,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, PandasetError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| PandasetError::LayoutInvalid {
            path: dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Returns the final path segment as a string, if it is valid UTF-8.
pub fn basename(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Returns true when the directory's name ends with `suffix`.
pub(crate) fn dir_name_ends_with(path: &Path, suffix: &str) -> bool {
    basename(path)
        .map(|name| name.ends_with(suffix))
        .unwrap_or(false)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}
