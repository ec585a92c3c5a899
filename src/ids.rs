//! Identifier loader.
//!
//! Reads the EYF ID list, one ID per line, and applies the configured
//! blank-line and duplicate policies.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{DuplicatePolicy, IdsConfig};
use crate::error::{Result, WaiverError};

/// Read IDs from the file at `path`.
///
/// # Errors
/// Returns [`WaiverError::IdsFile`] if the file is missing or unreadable, and
/// [`WaiverError::DuplicateIds`] under the `reject` policy.
pub fn load_ids(path: &Path, config: &IdsConfig) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| WaiverError::IdsFile {
        path: path.to_owned(),
        source,
    })?;
    let ids = read_ids(BufReader::new(file), config).map_err(|e| match e {
        WaiverError::Io(source) => WaiverError::IdsFile {
            path: path.to_owned(),
            source,
        },
        other => other,
    })?;
    tracing::info!(path = %path.display(), count = ids.len(), "loaded EYF IDs");
    Ok(ids)
}

/// Read IDs from any line source, in order.
///
/// Each line is trimmed of surrounding whitespace.
///
/// # Errors
/// Returns [`WaiverError::Io`] on read failures (including invalid UTF-8) and
/// [`WaiverError::DuplicateIds`] under the `reject` policy.
pub fn read_ids<R: BufRead>(reader: R, config: &IdsConfig) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if id.is_empty() && config.skip_blank {
            continue;
        }
        ids.push(id.to_owned());
    }
    apply_duplicate_policy(ids, config.duplicates)
}

fn apply_duplicate_policy(ids: Vec<String>, policy: DuplicatePolicy) -> Result<Vec<String>> {
    match policy {
        DuplicatePolicy::Keep => Ok(ids),
        DuplicatePolicy::Dedupe => {
            let mut seen = HashSet::new();
            let before = ids.len();
            let ids: Vec<String> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
            if ids.len() < before {
                tracing::warn!(dropped = before - ids.len(), "dropped duplicate EYF IDs");
            }
            Ok(ids)
        }
        DuplicatePolicy::Reject => {
            let repeated = repeated_ids(&ids);
            if repeated.is_empty() {
                Ok(ids)
            } else {
                Err(WaiverError::DuplicateIds { ids: repeated })
            }
        }
    }
}

/// Each ID that occurs more than once, listed once, in first-repeat order.
fn repeated_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut repeated = Vec::new();
    for id in ids {
        if !seen.insert(id.as_str()) && reported.insert(id.as_str()) {
            repeated.push(id.clone());
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str, config: &IdsConfig) -> Result<Vec<String>> {
        read_ids(input.as_bytes(), config)
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let err = read_ids(&b"1\n\xff\n"[..], &IdsConfig::default()).unwrap_err();
        match err {
            WaiverError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, b"100\n\xfe\xff\n").unwrap();
        let err = load_ids(&path, &IdsConfig::default()).unwrap_err();
        assert!(
            matches!(&err, WaiverError::IdsFile { path: p, .. } if *p == path),
            "got {err:?}"
        );
    }

    #[test]
    fn one_id_per_line_trimmed() {
        let ids = read("100\n  101 \n\t102\r\n", &IdsConfig::default()).unwrap();
        assert_eq!(ids, ["100", "101", "102"]);
    }

    #[test]
    fn blank_lines_skipped_by_default() {
        let ids = read("\n100\n   \n101\n\n", &IdsConfig::default()).unwrap();
        assert_eq!(ids, ["100", "101"]);
    }

    #[test]
    fn blank_lines_kept_when_configured() {
        let config = IdsConfig {
            skip_blank: false,
            ..IdsConfig::default()
        };
        let ids = read("100\n\n101\n", &config).unwrap();
        assert_eq!(ids, ["100", "", "101"]);
    }

    #[test]
    fn empty_input_yields_no_ids() {
        assert!(read("", &IdsConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn duplicates_kept_by_default() {
        let ids = read("1\n2\n1\n", &IdsConfig::default()).unwrap();
        assert_eq!(ids, ["1", "2", "1"]);
    }

    #[test]
    fn duplicates_deduped_keep_first_occurrence() {
        let config = IdsConfig {
            duplicates: DuplicatePolicy::Dedupe,
            ..IdsConfig::default()
        };
        let ids = read("3\n1\n3\n2\n1\n", &config).unwrap();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn duplicates_rejected_lists_each_once() {
        let config = IdsConfig {
            duplicates: DuplicatePolicy::Reject,
            ..IdsConfig::default()
        };
        let err = read("5\n7\n5\n7\n5\n9\n", &config).unwrap_err();
        match err {
            WaiverError::DuplicateIds { ids } => assert_eq!(ids, ["5", "7"]),
            other => panic!("expected DuplicateIds, got {other:?}"),
        }
    }

    #[test]
    fn reject_passes_unique_input() {
        let config = IdsConfig {
            duplicates: DuplicatePolicy::Reject,
            ..IdsConfig::default()
        };
        assert_eq!(read("1\n2\n", &config).unwrap(), ["1", "2"]);
    }

    #[test]
    fn missing_file_is_ids_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_ids(&path, &IdsConfig::default()).unwrap_err();
        assert!(matches!(err, WaiverError::IdsFile { .. }), "got {err:?}");
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, "100\n101\n").unwrap();
        assert_eq!(load_ids(&path, &IdsConfig::default()).unwrap(), ["100", "101"]);
    }
}
