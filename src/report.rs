//! Reporter: split match results into unmatched, ambiguous and resolved.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::matcher::MatchResult;

/// An ID that did not resolve to exactly one waiver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchProblem {
    /// No file matched.
    Unmatched { id: String },
    /// More than one file matched; every candidate is listed.
    Ambiguous { id: String, candidates: Vec<PathBuf> },
}

impl MatchProblem {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Unmatched { id } | Self::Ambiguous { id, .. } => id,
        }
    }
}

impl fmt::Display for MatchProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmatched { id } => write!(f, "ERROR: No waiver found for EYF ID {id}"),
            Self::Ambiguous { id, candidates } => {
                write!(f, "ERROR: Multiple waivers found for EYF ID {id}:")?;
                for path in candidates {
                    write!(f, "\n  {}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Classification of every ID in a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Number of IDs considered.
    pub total: usize,
    /// Problems, in ID order.
    pub problems: Vec<MatchProblem>,
    /// One waiver per resolved ID, in ID order.
    pub resolved: Vec<PathBuf>,
}

impl Outcome {
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| matches!(p, MatchProblem::Unmatched { .. }))
            .count()
    }

    #[must_use]
    pub fn ambiguous(&self) -> usize {
        self.problems.len() - self.unmatched()
    }

    /// The confirmation question shown before assembly.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Successfully matched waivers for {} out of {} EYF IDs. Proceed with PDF generation?",
            self.resolved.len(),
            self.total
        )
    }

    /// Write one line (or block) per problem.
    ///
    /// # Errors
    /// Propagates write failures.
    pub fn write_problems(&self, out: &mut dyn Write) -> io::Result<()> {
        for problem in &self.problems {
            writeln!(out, "{problem}")?;
        }
        Ok(())
    }
}

/// Classify `results`; an ID is resolved only when exactly one file matched.
#[must_use]
pub fn classify(results: Vec<MatchResult>) -> Outcome {
    let mut outcome = Outcome {
        total: results.len(),
        ..Outcome::default()
    };
    for MatchResult { id, mut paths } in results {
        match paths.len() {
            0 => {
                tracing::warn!(id = %id, "no waiver found");
                outcome.problems.push(MatchProblem::Unmatched { id });
            }
            1 => outcome.resolved.extend(paths.pop()),
            n => {
                tracing::warn!(id = %id, candidates = n, "multiple waivers found");
                outcome.problems.push(MatchProblem::Ambiguous {
                    id,
                    candidates: paths,
                });
            }
        }
    }
    tracing::info!(
        total = outcome.total,
        resolved = outcome.resolved.len(),
        unmatched = outcome.unmatched(),
        ambiguous = outcome.ambiguous(),
        "classified match results"
    );
    outcome
}
