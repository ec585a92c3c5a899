//! Matcher: resolve each EYF ID to the waiver files named after it.
//!
//! A file belongs to ID `<id>` when its name matches `<id>_*.<ext>`. The `_`
//! delimiter keeps ID `1` from picking up `10_...` files.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::Result;
use crate::folder::{self, FolderEntry};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One ID and every file found for it.
///
/// Zero paths means unmatched, one means resolved, more means ambiguous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub id: String,
    pub paths: Vec<PathBuf>,
}

impl MatchResult {
    #[must_use]
    pub fn new(id: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Self {
            id: id.into(),
            paths,
        }
    }
}

/// The glob a waiver file for `id` must match.
///
/// Glob metacharacters in `id` are escaped so they match literally.
///
/// # Errors
/// Returns the glob error if the escaped pattern does not compile.
pub fn candidate_pattern(id: &str, extension: &str) -> Result<Pattern, glob::PatternError> {
    Pattern::new(&format!(
        "{}_*.{}",
        Pattern::escape(id),
        Pattern::escape(extension)
    ))
}

/// Find the candidate files for each ID in `ids`, preserving input order.
///
/// The folder is listed once; candidates for each ID are sorted by name.
///
/// # Errors
/// Returns [`crate::error::WaiverError::FolderNotFound`] if `dir` does not
/// exist.
pub fn match_ids(dir: &Path, ids: &[String], extension: &str) -> Result<Vec<MatchResult>> {
    let entries = folder::scan(dir)?;
    let results = ids
        .iter()
        .map(|id| match_one(&entries, id, extension))
        .collect();
    Ok(results)
}

fn match_one(entries: &[FolderEntry], id: &str, extension: &str) -> MatchResult {
    let Ok(pattern) = candidate_pattern(id, extension) else {
        tracing::warn!(id, "EYF ID does not form a valid file pattern");
        return MatchResult::new(id, Vec::new());
    };
    let mut hits: Vec<&FolderEntry> = entries
        .iter()
        .filter(|e| {
            e.name
                .as_deref()
                .is_some_and(|name| pattern.matches_with(name, MATCH_OPTIONS))
        })
        .collect();
    hits.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(id, matches = hits.len(), "matched EYF ID");
    MatchResult::new(id, hits.into_iter().map(|e| e.path.clone()).collect())
}
