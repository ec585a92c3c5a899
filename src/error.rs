//! Error types for waiver requests.
//!
//! [`WaiverError`] is the single error type returned by every pipeline stage.
//! The binary matches on the variant to pick an exit status, so callers never
//! need to parse error messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Exit status for naming-format violations.
pub const EXIT_NAMING: u8 = 1;

/// Exit status for every other failure (missing inputs, I/O, bad config).
pub const EXIT_FAILURE: u8 = 2;

/// Errors returned by the waiver pipeline.
#[derive(Debug, Error)]
pub enum WaiverError {
    /// The waiver folder does not exist or is not a directory.
    #[error("waiver folder does not exist: {}", path.display())]
    FolderNotFound {
        /// The path that was given on the command line.
        path: PathBuf,
    },

    /// The IDs file could not be opened or read.
    #[error("could not read IDs file {}", path.display())]
    IdsFile {
        /// Path to the IDs file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The IDs file repeats one or more identifiers and the duplicate policy
    /// is `reject`.
    #[error("duplicate EYF IDs in input: {}", ids.join(", "))]
    DuplicateIds {
        /// Each repeated identifier, once, in the order it was first repeated.
        ids: Vec<String>,
    },

    /// One or more files in the waiver folder do not follow the naming rule.
    #[error(
        "ERROR: Some files do not match the expected format: {description}\n{}",
        files.join("\n")
    )]
    NamingViolations {
        /// Human-readable form of the expected file name.
        description: String,
        /// Every offending file name, in directory order.
        files: Vec<String>,
    },

    /// The configured naming pattern is not a valid regular expression.
    #[error("invalid naming pattern `{pattern}`")]
    InvalidPattern {
        /// The pattern as written in the configuration.
        pattern: String,
        /// Compilation failure from the regex engine.
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any other I/O failure (folder scan, console I/O, assembler output).
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl WaiverError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NamingViolations { .. } => EXIT_NAMING,
            _ => EXIT_FAILURE,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = WaiverError> = std::result::Result<T, E>;
