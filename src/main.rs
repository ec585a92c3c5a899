use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use waiver::WaiverError;
use waiver::assemble::ListingAssembler;
use waiver::config::{DEFAULT_CONFIG_FILE, WaiverConfig};
use waiver::confirm::{AssumeYes, Confirm, PromptConfirm};
use waiver::format::OutputFormat;
use waiver::pipeline::{self, Request, RunStatus};
use waiver::telemetry;

/// Validate a folder of FERPA waivers and gather one waiver per EYF ID
///
/// Every file in the folder must be named
/// `<EYF ID>_<Client name>_KCS Records Consent_<anything>.pdf`. Each EYF ID
/// in the IDs file is then matched to the file whose name starts with
/// `<EYF ID>_`. IDs with no waiver, or with more than one, are reported and
/// left out. After confirmation, the matched waivers are listed for
/// combining.
///
/// EXIT STATUS:
///
///   0  finished, or cancelled at the prompt
///   1  bad arguments, or files in the folder do not follow the naming rule
///   2  missing inputs, unreadable files, or invalid configuration
#[derive(Parser)]
#[command(name = "waiver-request")]
#[command(version, about)]
struct Cli {
    /// Path to the folder containing the FERPA waivers
    waiver_folder: PathBuf,

    /// Path to text file containing EYF IDs (one per line)
    ids_file: PathBuf,

    /// Proceed without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Configuration file [default: ./waiver.toml]
    #[arg(short, long, env = "WAIVER_CONFIG")]
    config: Option<PathBuf>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = u8::from(e.use_stderr());
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    telemetry::init();

    let Err(e) = run(&cli) else {
        return ExitCode::SUCCESS;
    };
    match e.downcast_ref::<WaiverError>() {
        // Already formatted as an ERROR: header plus one file per line.
        Some(err @ WaiverError::NamingViolations { .. }) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
        Some(err) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(err.exit_code())
        }
        None => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(waiver::error::EXIT_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunStatus> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = WaiverConfig::load(&config_path).map_err(WaiverError::from)?;

    let request = Request {
        folder: cli.waiver_folder.clone(),
        ids_file: cli.ids_file.clone(),
        format: cli.format,
    };

    let mut prompt;
    let mut assume_yes = AssumeYes;
    let confirm: &mut dyn Confirm = if cli.yes {
        &mut assume_yes
    } else {
        prompt = PromptConfirm::new(io::stdin().lock(), io::stdout());
        &mut prompt
    };
    let mut assembler = ListingAssembler::new(io::stdout());

    let status = pipeline::run(&request, &config, confirm, &mut assembler, &mut io::stdout())?;
    Ok(status)
}
