//! Confirmation before assembly.
//!
//! The pipeline asks a [`Confirm`] implementation instead of reading stdin
//! directly, so tests and `--yes` can script the answer.

use std::io::{BufRead, Write};

use crate::error::Result;

/// Answers the "proceed with PDF generation?" question.
pub trait Confirm {
    /// Show `summary` and return `true` to proceed.
    ///
    /// # Errors
    /// Returns an error if the answer cannot be read.
    fn confirm(&mut self, summary: &str) -> Result<bool>;
}

/// Always proceeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, summary: &str) -> Result<bool> {
        tracing::debug!(summary, "confirmation skipped");
        Ok(true)
    }
}

/// Prints the summary and reads one answer line.
///
/// Only `y` (any case, surrounding whitespace ignored) proceeds. End of input
/// counts as a decline.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, summary: &str) -> Result<bool> {
        writeln!(self.output, "{summary}")?;
        write!(self.output, "Enter 'y' to continue or 'n' to cancel: ")?;
        self.output.flush()?;

        let mut input = String::new();
        self.input.read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}
