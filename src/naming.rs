//! Format validator.
//!
//! Every file in the waiver folder must follow the naming rule
//! `<digits>_<client name>_KCS Records Consent_<anything>.pdf` (or whatever
//! pattern the configuration supplies). Validation never stops at the first
//! bad file: the [`FormatReport`] carries all of them so the user can fix the
//! folder in one pass.

use std::path::Path;

use regex::Regex;

use crate::config::NamingConfig;
use crate::error::{Result, WaiverError};
use crate::folder;

/// A compiled naming rule.
#[derive(Clone, Debug)]
pub struct NamingRule {
    regex: Regex,
    description: String,
}

impl NamingRule {
    /// Compile `pattern`; `description` is the human-readable template shown
    /// alongside violations.
    ///
    /// # Errors
    /// Returns [`WaiverError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(pattern: &str, description: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| WaiverError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            regex,
            description: description.into(),
        })
    }

    /// Build the rule from configuration.
    ///
    /// # Errors
    /// Returns [`WaiverError::InvalidPattern`] if the configured pattern does
    /// not compile.
    pub fn from_config(config: &NamingConfig) -> Result<Self> {
        Self::new(&config.pattern, config.description.clone())
    }

    /// Human-readable template of a conforming file name.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `file_name` conforms.
    ///
    /// The pattern must match starting at the first character.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.find(file_name).is_some_and(|m| m.start() == 0)
    }
}

/// Conforming and non-conforming file names, in folder order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl FormatReport {
    /// `true` if no file violates the rule.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// The valid names when the folder is clean, otherwise an error.
    ///
    /// # Errors
    /// Returns [`WaiverError::NamingViolations`] listing every invalid file.
    pub fn into_result(self, rule: &NamingRule) -> Result<Vec<String>> {
        if self.is_clean() {
            Ok(self.valid)
        } else {
            Err(WaiverError::NamingViolations {
                description: rule.description().to_owned(),
                files: self.invalid,
            })
        }
    }
}

/// Classify every regular file directly inside `dir` against `rule`.
///
/// # Errors
/// Returns [`WaiverError::FolderNotFound`] if `dir` does not exist.
pub fn validate_folder(dir: &Path, rule: &NamingRule) -> Result<FormatReport> {
    let mut report = FormatReport::default();
    for entry in folder::scan(dir)? {
        match entry.name {
            Some(name) if rule.matches(&name) => report.valid.push(name),
            Some(name) => {
                tracing::debug!(file = %name, "file name does not match naming rule");
                report.invalid.push(name);
            }
            None => report.invalid.push(entry.display_name()),
        }
    }
    tracing::info!(
        valid = report.valid.len(),
        invalid = report.invalid.len(),
        "validated waiver file names"
    );
    Ok(report)
}
