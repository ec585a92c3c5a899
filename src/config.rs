//! Waiver request configuration (`waiver.toml`).
//!
//! Every field has a default, and a missing file means "all defaults".
//! The defaults reproduce the KCS Records Consent naming convention.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "waiver.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaiverConfig {
    /// File naming rule for the waiver folder.
    #[serde(default)]
    pub naming: NamingConfig,

    /// How the IDs file is read.
    #[serde(default)]
    pub ids: IdsConfig,

    /// How IDs are matched to files.
    #[serde(default)]
    pub matching: MatchingConfig,
}

// ---------------------------------------------------------------------------
// NamingConfig
// ---------------------------------------------------------------------------

/// Naming convention every file in the waiver folder must follow.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Regular expression matched against each file name.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Human-readable template shown when files violate the pattern.
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            description: default_description(),
        }
    }
}

fn default_pattern() -> String {
    r"^[0-9]+_[A-Za-z ]+_KCS Records Consent_.*\.pdf$".to_owned()
}

fn default_description() -> String {
    "[EYF ID]_[Client name]_KCS Records Consent_[previous file name]_[date].pdf".to_owned()
}

// ---------------------------------------------------------------------------
// IdsConfig
// ---------------------------------------------------------------------------

/// IDs file handling.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdsConfig {
    /// What to do when the same ID appears more than once.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Drop blank lines instead of treating them as empty IDs.
    #[serde(default = "default_skip_blank")]
    pub skip_blank: bool,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            skip_blank: default_skip_blank(),
        }
    }
}

const fn default_skip_blank() -> bool {
    true
}

/// Policy for repeated IDs in the input list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Process every occurrence; a resolved ID contributes its waiver once
    /// per occurrence.
    #[default]
    Keep,
    /// Keep only the first occurrence of each ID.
    Dedupe,
    /// Refuse to run.
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Dedupe => write!(f, "dedupe"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

// ---------------------------------------------------------------------------
// MatchingConfig
// ---------------------------------------------------------------------------

/// ID-to-file matching settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    /// File extension (without the dot) a candidate must end with.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "pdf".to_owned()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("could not read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not fit the schema.
    #[error("{}{}", parse_prefix(path.as_deref(), *line, section.as_deref()), message)]
    Parse {
        /// File the text came from; `None` for [`WaiverConfig::parse`].
        path: Option<PathBuf>,
        /// 1-based line of the offending key or value, when known.
        line: Option<usize>,
        /// Enclosing `[table]`, when the error sits inside one.
        section: Option<String>,
        message: String,
    },
}

fn parse_prefix(path: Option<&Path>, line: Option<usize>, section: Option<&str>) -> String {
    let mut prefix = path.map_or_else(
        || "config error: ".to_owned(),
        |p| format!("{}: ", p.display()),
    );
    if let Some(section) = section {
        prefix.push_str(&format!("[{section}] "));
    }
    if let Some(line) = line {
        prefix.push_str(&format!("line {line}: "));
    }
    prefix
}

/// Name of the last table header at or before byte `offset`.
fn section_at(toml_str: &str, offset: usize) -> Option<String> {
    toml_str[..offset]
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| l.starts_with('['))
        .map(|header| header.trim_matches(|c| c == '[' || c == ']').trim().to_owned())
}

impl WaiverConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields all defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read and
    /// [`ConfigError::Parse`] if its contents are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        let config = Self::parse(&contents).map_err(|e| match e {
            ConfigError::Parse {
                line,
                section,
                message,
                ..
            } => ConfigError::Parse {
                path: Some(path.to_owned()),
                line,
                section,
                message,
            },
            read @ ConfigError::Read { .. } => read,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let start = e.span().map(|span| span.start);
            ConfigError::Parse {
                path: None,
                line: start.map(|s| toml_str[..s].matches('\n').count() + 1),
                section: start.and_then(|s| section_at(toml_str, s)),
                message: e.message().to_owned(),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
