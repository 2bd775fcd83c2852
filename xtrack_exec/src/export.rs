//! # Result export
//!
//! Writes the results of a batch into the session directory:
//!
//! - `arch/<nnn>_<stem>/trajectory.csv` with the turn segment in both frames,
//! - `arch/<nnn>_<stem>/cross_track.csv` with the reported cross track errors,
//! - `summary.json` with one entry per input file.
//!
//! `nnn` is the position of the file in the batch so inputs sharing a stem never collide.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use util::{
    archive::{ArchiveError, Archived, Archiver},
    session::Session,
};

use crate::{
    analysis::{AnalysisOutput, AnalysisStats, ErrorKind},
    batch::{BatchSummary, FileOutcome, FileReport},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Session relative path of the batch summary
pub const SUMMARY_PATH: &str = "summary.json";

const TRAJECTORY_FILE: &str = "trajectory.csv";
const CROSS_TRACK_FILE: &str = "cross_track.csv";

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveParams {
    /// If false only the summary is written
    pub enabled: bool,
}

/// CSV archives of one analysed file.
pub struct ResultArchive {
    dir: PathBuf,
    trajectory: Archiver,
    cross_track: Archiver,
}

#[derive(Serialize)]
struct TrajectoryRow {
    index: usize,
    x_m: f64,
    y_m: f64,
    cross_track_m: f64,
    along_track_m: f64,
}

#[derive(Serialize)]
struct CrossTrackRow {
    index: usize,
    error_m: f64,
}

/// Content of the summary file.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub files: Vec<FileEntry>,
}

/// Summary entry of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_heading_deg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AnalysisStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for ArchiveParams {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ResultArchive {
    /// Create the archive for the `index`th file of the batch.
    pub fn new(session: &Session, index: usize, input_path: &Path) -> Result<Self, ArchiveError> {
        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".into());
        let dir_name = format!("{:03}_{}", index, stem);

        let trajectory = Archiver::from_path(session, Path::new(&dir_name).join(TRAJECTORY_FILE))?;
        let cross_track =
            Archiver::from_path(session, Path::new(&dir_name).join(CROSS_TRACK_FILE))?;

        Ok(Self {
            dir: session.arch_root.join(dir_name),
            trajectory,
            cross_track,
        })
    }

    /// Directory holding this file's archives.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Archived for ResultArchive {
    type Data = AnalysisOutput;

    fn write(&mut self, output: &AnalysisOutput) -> Result<(), ArchiveError> {
        for (index, (p, t)) in output
            .projected_m
            .iter()
            .zip(output.transformed.iter())
            .enumerate()
        {
            self.trajectory.serialise(TrajectoryRow {
                index,
                x_m: p.x,
                y_m: p.y,
                cross_track_m: t.cross_track_m,
                along_track_m: t.along_track_m,
            })?;
        }

        for s in output.samples.iter() {
            self.cross_track.serialise(CrossTrackRow {
                index: s.index,
                error_m: s.error_m,
            })?;
        }

        self.trajectory.flush()?;
        self.cross_track.flush()
    }
}

impl BatchReport {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        Self {
            summary: BatchSummary::from_reports(reports),
            files: reports.iter().map(FileEntry::from_report).collect(),
        }
    }
}

impl FileEntry {
    fn from_report(report: &FileReport) -> Self {
        match report.outcome {
            FileOutcome::Success(ref o) => Self {
                path: report.path.clone(),
                success: true,
                baseline_heading_deg: Some(o.frame.heading_deg),
                stats: Some(o.stats),
                error_kind: None,
                error_message: None,
            },
            FileOutcome::Failure {
                kind,
                ref message,
            } => Self {
                path: report.path.clone(),
                success: false,
                baseline_heading_deg: None,
                stats: None,
                error_kind: Some(kind),
                error_message: Some(message.clone()),
            },
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Export the results of a batch into the session.
///
/// Archive failures are logged and do not stop the export of the remaining files. The summary is
/// handed to the session's save thread and is complete once the session has exited.
pub fn export_reports(session: &Session, reports: &[FileReport], params: &ArchiveParams) {
    if params.enabled {
        for (index, report) in reports.iter().enumerate() {
            let output = match report.output() {
                Some(o) => o,
                None => continue,
            };

            match ResultArchive::new(session, index, &report.path)
                .and_then(|mut arch| arch.write(output).map(|_| arch))
            {
                Ok(arch) => debug!("Archived {:?} into {:?}", report.path, arch.dir()),
                Err(e) => warn!("Could not archive results of {:?}: {}", report.path, e),
            }
        }
    }

    session.save(SUMMARY_PATH, BatchReport::from_reports(reports));
}
