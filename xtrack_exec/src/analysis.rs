//! # Trajectory analysis
//!
//! Runs the full analysis of one trajectory file:
//!
//! 1. find the reference fix and build the baseline frame,
//! 2. project the target point,
//! 3. extract the turn segment and project its points,
//! 4. express the points in the baseline frame,
//! 5. collect the reported cross track errors and the overlay guides.
//!
//! Per-record parse failures are never errors, they simply remove the record from the part of
//! the analysis that needed the value.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    baseline::{BaselineError, BaselineFrame},
    cross_track::extract_samples,
    overlay::OverlayGuides,
    proj::{ProjError, ProjParams, Projector},
    record::{BaselineRelativePoint, CrossTrackSample, ProjectedPoint, ReferenceFix, TrajectoryRecord},
    reference::{extract_reference, ReferenceFields},
    source::{load_records, SourceError},
    transform::{project_trajectory, transform},
    turn_filter::{filter_turn_segment, TurnFilterParams},
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters of the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub proj: ProjParams,
    pub reference: ReferenceFields,
    pub turn_filter: TurnFilterParams,
}

/// Everything produced by the analysis of one file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub reference: ReferenceFix,
    pub frame: BaselineFrame,

    /// Target point in the projection frame
    pub target_m: ProjectedPoint,

    /// Turn segment points in the projection frame
    pub projected_m: Vec<ProjectedPoint>,

    /// Turn segment points in the baseline frame, in the same order as `projected_m`
    pub transformed: Vec<BaselineRelativePoint>,

    pub samples: Vec<CrossTrackSample>,

    pub guides: Option<OverlayGuides>,

    pub stats: AnalysisStats,
}

/// Counts describing how much of the input contributed to the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Records in the file
    pub num_records: usize,

    /// Records in the turn segment
    pub num_filtered: usize,

    /// Projected trajectory points
    pub num_points: usize,

    /// Turn segment records whose coordinates could not be projected
    pub num_skipped_points: usize,

    /// Cross track samples
    pub num_samples: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Errors which prevent a file from being analysed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No record carries a complete reference fix (required fields: {})", .0.join(", "))]
    MissingReference(Vec<String>),

    #[error("Cannot project the target point: {0}")]
    Projection(#[from] ProjError),

    #[error("Invalid baseline: {0}")]
    InvalidBaseline(#[from] BaselineError),

    #[error("Cannot read the records: {0}")]
    Source(#[from] SourceError),
}

/// Category of an `AnalysisError`, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingReference,
    Projection,
    InvalidBaseline,
    Source,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingReference(_) => ErrorKind::MissingReference,
            AnalysisError::Projection(_) => ErrorKind::Projection,
            AnalysisError::InvalidBaseline(_) => ErrorKind::InvalidBaseline,
            AnalysisError::Source(_) => ErrorKind::Source,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Load and analyse one file.
pub fn analyse_file<P: AsRef<Path>>(
    path: P,
    params: &AnalysisParams,
) -> Result<AnalysisOutput, AnalysisError> {
    let records = load_records(path.as_ref())?;
    analyse_records(&records, params)
}

/// Analyse the records of one file.
pub fn analyse_records(
    records: &[TrajectoryRecord],
    params: &AnalysisParams,
) -> Result<AnalysisOutput, AnalysisError> {
    // ---- REFERENCE ----

    let reference = extract_reference(records, &params.reference)
        .ok_or_else(|| AnalysisError::MissingReference(params.reference.names()))?;

    let frame = BaselineFrame::from_fix(&reference)?;

    debug!(
        "Reference fix: target ({}, {}), baseline heading {:.3} deg",
        reference.target_lat_deg,
        reference.target_lon_deg,
        frame.display_heading_deg()
    );

    // ---- PROJECTION ----

    let projector = Projector::new(&params.proj)?;
    let target_m = projector.project(reference.target_lat_deg, reference.target_lon_deg)?;

    // ---- TURN SEGMENT ----

    let segment = filter_turn_segment(records, &params.turn_filter);
    let traj = project_trajectory(segment.iter().copied(), &projector);

    // ---- BASELINE FRAME ----

    let transformed = transform(&traj.points, &target_m, &frame);
    let samples = extract_samples(segment.iter().copied());
    let guides = OverlayGuides::new(&traj.points, &target_m, &frame);

    let stats = AnalysisStats {
        num_records: records.len(),
        num_filtered: segment.len(),
        num_points: traj.points.len(),
        num_skipped_points: traj.num_skipped,
        num_samples: samples.len(),
    };

    info!(
        "Analysed {} records: {} in the turn segment, {} points, {} cross track samples",
        stats.num_records, stats.num_filtered, stats.num_points, stats.num_samples
    );

    Ok(AnalysisOutput {
        reference,
        frame,
        target_m,
        projected_m: traj.points,
        transformed,
        samples,
        guides,
        stats,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::records_from_reader;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector2;

    const HEADER: &str = "timestamp,lat,lon,turn_status,cross_track_error,target_lat,target_lon,heading_deg,offset_deg\n";

    #[test]
    fn test_end_to_end() {
        let data = format!(
            "{}{}{}{}{}{}",
            HEADER,
            "t0,35.0000,135.0000,5,,35.001,135.001,90,0\n",
            "t1,35.0010,135.0010,0,0.10,,,,\n",
            "t2,35.0010,135.0020,3,-0.20,,,,\n",
            "t3,35.0005,135.0030,2,,,,,\n",
            "t4,abc,135.0030,1,x,,,,\n",
        );
        let records = records_from_reader(data.as_bytes()).unwrap();

        let out = analyse_records(&records, &AnalysisParams::default()).unwrap();

        assert_abs_diff_eq!(out.frame.unit, Vector2::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(out.frame.perp, Vector2::new(0.0, -1.0), epsilon = 1e-12);

        // The first segment record is the target itself
        assert_abs_diff_eq!(out.transformed[0].cross_track_m, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out.transformed[0].along_track_m, 0.0, epsilon = 1e-6);

        // Further east means further along the baseline
        assert!(out.transformed[1].along_track_m > 80.0);
        assert!(out.transformed[1].cross_track_m.abs() < 1.0);

        // South of the target is to the right of an eastbound baseline
        assert!(out.transformed[2].cross_track_m > 50.0);

        assert_eq!(
            out.samples,
            vec![
                CrossTrackSample {
                    index: 0,
                    error_m: 0.10
                },
                CrossTrackSample {
                    index: 1,
                    error_m: -0.20
                },
            ]
        );

        assert_eq!(
            out.stats,
            AnalysisStats {
                num_records: 5,
                num_filtered: 4,
                num_points: 3,
                num_skipped_points: 0,
                num_samples: 2,
            }
        );
        assert!(out.guides.is_some());
    }

    #[test]
    fn test_missing_reference() {
        let data = format!("{}{}", HEADER, "t0,35.0,135.0,0,0.1,35.0,,90,0\n");
        let records = records_from_reader(data.as_bytes()).unwrap();

        let err = analyse_records(&records, &AnalysisParams::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingReference);
        match err {
            AnalysisError::MissingReference(fields) => {
                assert_eq!(
                    fields,
                    vec!["target_lat", "target_lon", "heading_deg", "offset_deg"]
                )
            }
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_target_projection_is_fatal() {
        let data = format!("{}{}", HEADER, "t0,35.0,135.0,0,0.1,-35.0,-45.0,90,0\n");
        let records = records_from_reader(data.as_bytes()).unwrap();

        let err = analyse_records(&records, &AnalysisParams::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Projection);
    }

    #[test]
    fn test_no_turn_segment_is_empty_output() {
        let data = format!(
            "{}{}{}",
            HEADER, "t0,35.0,135.0,5,0.1,35.0,135.0,0,0\n", "t1,35.1,135.0,1,0.2,,,,\n",
        );
        let records = records_from_reader(data.as_bytes()).unwrap();

        let out = analyse_records(&records, &AnalysisParams::default()).unwrap();
        assert!(out.projected_m.is_empty());
        assert!(out.transformed.is_empty());
        assert!(out.samples.is_empty());
        assert!(out.guides.is_none());
        assert_eq!(out.stats.num_records, 2);
    }

    #[test]
    fn test_source_error_kind() {
        let err = analyse_file("this/file/does/not/exist.csv", &AnalysisParams::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Source);
    }
}
