//! The waiver request pipeline.
//!
//! Runs the stages in order, stopping at the first hard failure:
//!
//! 1. Load EYF IDs from the IDs file.
//! 2. Validate every file name in the waiver folder. Any violation stops the
//!    run before matching.
//! 3. Match each ID to its waiver files.
//! 4. Report unmatched and ambiguous IDs.
//! 5. Ask for confirmation, then hand the resolved waivers to the assembler.
//!
//! Per-ID match problems never stop the run; those IDs are simply left out of
//! the assembly.

use std::io::Write;
use std::path::PathBuf;

use crate::assemble::Assembler;
use crate::config::WaiverConfig;
use crate::confirm::Confirm;
use crate::error::Result;
use crate::format::OutputFormat;
use crate::ids::load_ids;
use crate::matcher::match_ids;
use crate::naming::{NamingRule, validate_folder};
use crate::report::{Outcome, classify};

/// Inputs for one run.
#[derive(Clone, Debug)]
pub struct Request {
    /// Folder holding the waiver PDFs.
    pub folder: PathBuf,
    /// Text file with one EYF ID per line.
    pub ids_file: PathBuf,
    /// How the match report is written.
    pub format: OutputFormat,
}

/// How a run ended when no error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The user confirmed and the assembler ran.
    Assembled(Outcome),
    /// The user declined; nothing was assembled.
    Cancelled(Outcome),
}

impl RunStatus {
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        match self {
            Self::Assembled(outcome) | Self::Cancelled(outcome) => outcome,
        }
    }
}

/// Run the full pipeline.
///
/// Report lines go to `out`; the confirmation question goes through
/// `confirm`.
///
/// # Errors
/// Returns the first hard failure: a bad naming pattern, a missing or
/// unreadable input, rejected duplicate IDs, naming violations in the folder,
/// or an I/O error from any collaborator.
pub fn run(
    request: &Request,
    config: &WaiverConfig,
    confirm: &mut dyn Confirm,
    assembler: &mut dyn Assembler,
    out: &mut dyn Write,
) -> Result<RunStatus> {
    let _span = tracing::info_span!(
        "waiver_request",
        folder = %request.folder.display(),
        ids_file = %request.ids_file.display(),
    )
    .entered();

    let rule = NamingRule::from_config(&config.naming)?;
    let ids = load_ids(&request.ids_file, &config.ids)?;

    validate_folder(&request.folder, &rule)?.into_result(&rule)?;

    let results = match_ids(&request.folder, &ids, &config.matching.extension)?;
    let outcome = classify(results);
    request.format.render(&outcome, out)?;

    if !confirm.confirm(&outcome.summary())? {
        writeln!(out, "Operation cancelled.")?;
        tracing::info!("assembly cancelled by user");
        return Ok(RunStatus::Cancelled(outcome));
    }

    assembler.assemble(&outcome.resolved)?;
    Ok(RunStatus::Assembled(outcome))
}
