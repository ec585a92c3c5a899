use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::report::{MatchProblem, Outcome};

/// Output format for the match report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text - one `ERROR:` line per problem
    #[default]
    Text,
    /// JSON - machine-parseable summary
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("Invalid format '{s}'. Use: text or json"),
        }
    }
}

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    total: usize,
    resolved: usize,
    unmatched: Vec<&'a str>,
    ambiguous: Vec<&'a MatchProblem>,
    pdfs: &'a [PathBuf],
}

impl<'a> From<&'a Outcome> for ReportEnvelope<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        let (unmatched, ambiguous): (Vec<_>, Vec<_>) = outcome
            .problems
            .iter()
            .partition(|p| matches!(p, MatchProblem::Unmatched { .. }));
        Self {
            total: outcome.total,
            resolved: outcome.resolved.len(),
            unmatched: unmatched.into_iter().map(MatchProblem::id).collect(),
            ambiguous,
            pdfs: &outcome.resolved,
        }
    }
}

impl OutputFormat {
    /// Write the match report for `outcome`.
    ///
    /// # Errors
    /// Propagates write failures.
    pub fn render(self, outcome: &Outcome, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Text => outcome.write_problems(out),
            Self::Json => {
                serde_json::to_writer_pretty(&mut *out, &ReportEnvelope::from(outcome))
                    .map_err(io::Error::from)?;
                writeln!(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Outcome {
        Outcome {
            total: 3,
            problems: vec![
                MatchProblem::Unmatched { id: "1".to_owned() },
                MatchProblem::Ambiguous {
                    id: "3".to_owned(),
                    candidates: vec![PathBuf::from("3_a.pdf"), PathBuf::from("3_b.pdf")],
                },
            ],
            resolved: vec![PathBuf::from("2_a.pdf")],
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("toon".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn text_lists_problems() {
        let mut out = Vec::new();
        OutputFormat::Text.render(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ERROR: No waiver found for EYF ID 1\n"));
        assert!(text.contains("  3_b.pdf\n"));
    }

    #[test]
    fn json_envelope() {
        let mut out = Vec::new();
        OutputFormat::Json.render(&sample(), &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["total"], 3);
        assert_eq!(parsed["resolved"], 1);
        assert_eq!(parsed["unmatched"], serde_json::json!(["1"]));
        assert_eq!(parsed["ambiguous"][0]["id"], "3");
        assert_eq!(parsed["ambiguous"][0]["candidates"][1], "3_b.pdf");
        assert_eq!(parsed["pdfs"], serde_json::json!(["2_a.pdf"]));
    }
}
