//! # Cross track samples
//!
//! Collects the cross track error reported by the vehicle over the turn segment.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::record::{CrossTrackSample, TrajectoryRecord, FIELD_CROSS_TRACK_ERROR};

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Extract the reported cross track errors of the turn segment.
///
/// The sample index is the position of the record within the segment, so gaps appear where a
/// record has no readable error. Timestamps are ignored.
pub fn extract_samples<'a, I>(segment: I) -> Vec<CrossTrackSample>
where
    I: IntoIterator<Item = &'a TrajectoryRecord>,
{
    segment
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .get_f64(FIELD_CROSS_TRACK_ERROR)
                .map(|error_m| CrossTrackSample { index, error_m })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_samples() {
        let segment: Vec<TrajectoryRecord> = ["1.2", "", "abc", "-0.3"]
            .iter()
            .map(|v| {
                TrajectoryRecord::new()
                    .with("cross_track_error", *v)
                    .with("timestamp", "2024-01-01 00:00:00")
            })
            .collect();

        assert_eq!(
            extract_samples(&segment),
            vec![
                CrossTrackSample {
                    index: 0,
                    error_m: 1.2
                },
                CrossTrackSample {
                    index: 3,
                    error_m: -0.3
                },
            ]
        );
    }

    #[test]
    fn test_missing_field_and_non_finite() {
        let segment = vec![
            TrajectoryRecord::new(),
            TrajectoryRecord::new().with("cross_track_error", "NaN"),
            TrajectoryRecord::new().with("cross_track_error", " 0.5 "),
        ];

        let samples = extract_samples(&segment);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].index, 2);
        assert_eq!(samples[0].error_m, 0.5);
    }
}
