//! # Batch analysis
//!
//! Analyses a list of files independently. A file which cannot be analysed produces a failure
//! report and never stops the rest of the batch. Reports are returned in input order whatever
//! the number of workers.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::channel,
    },
    thread,
};

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyse_file, AnalysisOutput, AnalysisParams, ErrorKind};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    /// Number of files analysed in parallel
    pub num_workers: usize,
}

/// The result of analysing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Counts over a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub num_files: usize,
    pub num_succeeded: usize,
    pub num_failed: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub enum FileOutcome {
    Success(Box<AnalysisOutput>),
    Failure { kind: ErrorKind, message: String },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for BatchParams {
    fn default() -> Self {
        Self { num_workers: 1 }
    }
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FileOutcome::Success(_))
    }

    /// The analysis output, if the file was analysed.
    pub fn output(&self) -> Option<&AnalysisOutput> {
        match self.outcome {
            FileOutcome::Success(ref o) => Some(o.as_ref()),
            FileOutcome::Failure { .. } => None,
        }
    }
}

impl BatchSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let num_succeeded = reports.iter().filter(|r| r.is_success()).count();

        Self {
            num_files: reports.len(),
            num_succeeded,
            num_failed: reports.len() - num_succeeded,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Analyse every file, using up to `num_workers` threads.
///
/// `num_workers` is clamped to between one and the number of files.
pub fn run_batch<P>(paths: &[P], params: &AnalysisParams, num_workers: usize) -> Vec<FileReport>
where
    P: AsRef<Path> + Sync,
{
    if paths.is_empty() {
        return Vec::new();
    }

    let num_workers = num_workers.clamp(1, paths.len());
    info!(
        "Analysing {} file(s) with {} worker(s)",
        paths.len(),
        num_workers
    );

    let next_index = AtomicUsize::new(0);
    let (tx, rx) = channel();

    thread::scope(|s| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let next_index = &next_index;

            s.spawn(move || loop {
                let i = next_index.fetch_add(1, Ordering::Relaxed);
                if i >= paths.len() {
                    break;
                }

                let report = analyse_one(paths[i].as_ref(), params);
                if tx.send((i, report)).is_err() {
                    break;
                }
            });
        }
    });

    // Every worker has finished, so dropping the last sender ends the receiver iterator
    drop(tx);

    let mut slots: Vec<Option<FileReport>> = (0..paths.len()).map(|_| None).collect();
    for (i, report) in rx {
        slots[i] = Some(report);
    }

    slots.into_iter().flatten().collect()
}

/// Log the outcome of every file and the batch totals.
pub fn log_summary(reports: &[FileReport]) -> BatchSummary {
    for report in reports {
        match report.outcome {
            FileOutcome::Success(ref o) => info!(
                "    OK   {:?}: {} points, {} samples, baseline {:.2} deg",
                report.path,
                o.stats.num_points,
                o.stats.num_samples,
                o.frame.display_heading_deg()
            ),
            FileOutcome::Failure {
                ref kind,
                ref message,
            } => error!("    FAIL {:?}: {:?}: {}", report.path, kind, message),
        }
    }

    let summary = BatchSummary::from_reports(reports);
    info!(
        "{} of {} file(s) analysed, {} failed",
        summary.num_succeeded, summary.num_files, summary.num_failed
    );

    summary
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn analyse_one(path: &Path, params: &AnalysisParams) -> FileReport {
    info!("Analysing {:?}", path);

    let outcome = match analyse_file(path, params) {
        Ok(output) => FileOutcome::Success(Box::new(output)),
        Err(e) => {
            error!("Analysis of {:?} failed: {}", path, e);
            FileOutcome::Failure {
                kind: e.kind(),
                message: e.to_string(),
            }
        }
    };

    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "lat,lon,turn_status,cross_track_error,target_lat,target_lon,heading_deg,offset_deg";

    fn good_file(dir: &Path, name: &str, heading: f64) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "35.0,135.0,0,0.1,35.0,135.0,{},0", heading).unwrap();
        writeln!(file, "35.001,135.0,3,0.2,,,,").unwrap();
        writeln!(file, "35.002,135.0,1,0.3,,,,").unwrap();
        path
    }

    fn bad_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "35.0,135.0,0,0.1,,,,").unwrap();
        path
    }

    #[test]
    fn test_failed_file_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            good_file(dir.path(), "a.csv", 0.0),
            bad_file(dir.path(), "b.csv"),
            dir.path().join("missing.csv"),
            good_file(dir.path(), "d.csv", 90.0),
        ];

        let reports = run_batch(&paths, &AnalysisParams::default(), 1);

        assert_eq!(reports.len(), 4);
        for (report, path) in reports.iter().zip(paths.iter()) {
            assert_eq!(&report.path, path);
        }

        assert!(reports[0].is_success());
        assert!(matches!(
            reports[1].outcome,
            FileOutcome::Failure {
                kind: ErrorKind::MissingReference,
                ..
            }
        ));
        assert!(matches!(
            reports[2].outcome,
            FileOutcome::Failure {
                kind: ErrorKind::Source,
                ..
            }
        ));
        assert_eq!(reports[3].output().unwrap().stats.num_filtered, 3);

        assert_eq!(
            log_summary(&reports),
            BatchSummary {
                num_files: 4,
                num_succeeded: 2,
                num_failed: 2,
            }
        );
    }

    #[test]
    fn test_parallel_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..12)
            .map(|i| {
                if i % 3 == 0 {
                    bad_file(dir.path(), &format!("{}.csv", i))
                } else {
                    good_file(dir.path(), &format!("{}.csv", i), i as f64 * 10.0)
                }
            })
            .collect();

        let serial = run_batch(&paths, &AnalysisParams::default(), 1);
        let parallel = run_batch(&paths, &AnalysisParams::default(), 4);

        assert_eq!(parallel.len(), paths.len());
        for (i, (s, p)) in serial.iter().zip(parallel.iter()).enumerate() {
            assert_eq!(s.path, p.path);
            assert_eq!(s.is_success(), p.is_success());
            assert_eq!(p.is_success(), i % 3 != 0);
            if let (Some(so), Some(po)) = (s.output(), p.output()) {
                assert_eq!(so.frame, po.frame);
                assert_eq!(so.stats, po.stats);
            }
        }
    }

    #[test]
    fn test_worker_count_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![good_file(dir.path(), "only.csv", 45.0)];

        assert_eq!(run_batch(&paths, &AnalysisParams::default(), 0).len(), 1);
        assert_eq!(run_batch(&paths, &AnalysisParams::default(), 64).len(), 1);
        assert!(run_batch::<PathBuf>(&[], &AnalysisParams::default(), 4).is_empty());
    }
}
