//! Cross track analysis executable entry point.
//!
//! # Architecture
//!
//! The execution consists of:
//!
//!     - Session, logging and parameter initialisation
//!     - Batch analysis of every input file:
//!         - Reference fix and baseline frame
//!         - Turn segment extraction
//!         - Projection and baseline frame transformation
//!         - Cross track sample extraction
//!     - Export of the per-file archives and the batch summary
//!
//! A file which cannot be analysed is reported and skipped, the executable only fails when no
//! file at all could be analysed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info};
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, parse_level, LevelFilter},
    session::Session,
};
use xtrack_lib::{
    batch::{log_summary, run_batch},
    export::{export_reports, ArchiveParams},
    params::XtrackExecParams,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const EXEC_NAME: &str = "xtrack_exec";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Baseline-relative analysis of vehicle trajectory logs.
#[derive(Debug, StructOpt)]
#[structopt(name = "xtrack_exec")]
struct Args {
    /// Trajectory CSV files to analyse
    #[structopt(parse(from_os_str), required = true)]
    files: Vec<PathBuf>,

    /// Parameter file, defaults are used if not given
    #[structopt(short, long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Directory in which the session directory is created
    #[structopt(long, parse(from_os_str), default_value = "sessions")]
    sessions_dir: PathBuf,

    /// Minimum log level (trace, debug, info, warn, error)
    #[structopt(short, long, default_value = "info", parse(try_from_str = parse_log_level))]
    log_level: LevelFilter,

    /// Number of files analysed in parallel, overrides the parameter file
    #[structopt(short, long)]
    workers: Option<usize>,

    /// Only write the batch summary, not the per-file archives
    #[structopt(long)]
    no_archive: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new(EXEC_NAME, &args.sessions_dir).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(args.log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Cross Track Analysis Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", args);

    // ---- LOAD PARAMETERS ----

    let params: XtrackExecParams = match args.params {
        Some(ref path) => util::params::load(path)
            .wrap_err_with(|| format!("Could not load parameters from {:?}", path))?,
        None => {
            info!("No parameter file given, using defaults");
            XtrackExecParams::default()
        }
    };

    info!("Exec parameters loaded");
    debug!("{:#?}", params);

    let num_workers = args.workers.unwrap_or(params.batch.num_workers);
    let archive_params = ArchiveParams {
        enabled: params.archive.enabled && !args.no_archive,
    };

    // ---- ANALYSIS ----

    let reports = run_batch(&args.files, &params.analysis, num_workers);
    let summary = log_summary(&reports);

    // ---- EXPORT ----

    export_reports(&session, &reports, &archive_params);

    // Wait for the summary to be written
    session.exit();

    if summary.num_succeeded == 0 {
        return Err(eyre!(
            "None of the {} input file(s) could be analysed",
            summary.num_files
        ));
    }

    Ok(())
}

fn parse_log_level(s: &str) -> std::result::Result<LevelFilter, String> {
    parse_level(s).ok_or_else(|| format!("Unknown log level \"{}\"", s))
}
