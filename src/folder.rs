//! Non-recursive scan of the waiver folder.

use std::path::{Path, PathBuf};

use crate::error::{Result, WaiverError};

/// A regular file directly inside the waiver folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderEntry {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, or `None` when it is not valid UTF-8.
    pub name: Option<String>,
}

impl FolderEntry {
    /// File name for display; non-UTF-8 bytes are replaced.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

/// List the regular files directly inside `dir`, in enumeration order.
///
/// Subdirectories are skipped. Symlinks are followed, so a link to a file
/// counts as a file.
///
/// # Errors
/// Returns [`WaiverError::FolderNotFound`] if `dir` does not exist or is not a
/// directory, and [`WaiverError::Io`] if it cannot be read.
pub fn scan(dir: &Path) -> Result<Vec<FolderEntry>> {
    if !dir.is_dir() {
        return Err(WaiverError::FolderNotFound {
            path: dir.to_owned(),
        });
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        let name = entry.file_name().into_string().ok();
        entries.push(FolderEntry { path, name });
    }
    tracing::debug!(dir = %dir.display(), files = entries.len(), "scanned waiver folder");
    Ok(entries)
}
