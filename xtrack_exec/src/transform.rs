//! # Coordinate transformation
//!
//! Expresses projected trajectory points in the baseline frame, relative to the target point.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use serde::Serialize;

use crate::{
    baseline::BaselineFrame,
    proj::Projector,
    record::{BaselineRelativePoint, ProjectedPoint, TrajectoryRecord, FIELD_LAT, FIELD_LON},
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The projected points of a turn segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedTrajectory {
    pub points: Vec<ProjectedPoint>,

    /// Number of records with coordinates which could not be projected
    pub num_skipped: usize,
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Transform projected points into the baseline frame centred on the target.
pub fn transform(
    points: &[ProjectedPoint],
    target: &ProjectedPoint,
    frame: &BaselineFrame,
) -> Vec<BaselineRelativePoint> {
    points
        .iter()
        .map(|p| {
            let d = p - target;
            BaselineRelativePoint {
                cross_track_m: d.dot(&frame.perp),
                along_track_m: d.dot(&frame.unit),
            }
        })
        .collect()
}

/// Project the coordinates of the given records.
///
/// Records without a readable latitude and longitude carry no position and are skipped. Records
/// whose coordinates cannot be projected are skipped with a warning and counted.
pub fn project_trajectory<'a, I>(records: I, projector: &Projector) -> ProjectedTrajectory
where
    I: IntoIterator<Item = &'a TrajectoryRecord>,
{
    let mut traj = ProjectedTrajectory::default();

    for (i, record) in records.into_iter().enumerate() {
        let (lat, lon) = match (record.get_f64(FIELD_LAT), record.get_f64(FIELD_LON)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => continue,
        };

        match projector.project(lat, lon) {
            Ok(p) => traj.points.push(p),
            Err(e) => {
                warn!("Skipping trajectory point {}: {}", i, e);
                traj.num_skipped += 1;
            }
        }
    }

    traj
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::proj::ProjParams;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_target_maps_to_origin() {
        let frame = BaselineFrame::new(37.0, 4.0).unwrap();
        let target = ProjectedPoint::new(12.5, -3.0);

        let out = transform(&[target], &target, &frame);
        assert_eq!(out, vec![BaselineRelativePoint::default()]);
    }

    #[test]
    fn test_length_and_order() {
        // Heading east: along track is +x, the right of the baseline is -y
        let frame = BaselineFrame::new(90.0, 0.0).unwrap();
        let target = ProjectedPoint::new(1.0, 1.0);
        let points = vec![
            ProjectedPoint::new(2.0, 1.0),
            ProjectedPoint::new(1.0, 0.0),
            ProjectedPoint::new(-1.0, 4.0),
        ];

        let out = transform(&points, &target, &frame);
        assert_eq!(out.len(), 3);

        assert_abs_diff_eq!(out[0].along_track_m, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[0].cross_track_m, 0.0, epsilon = 1e-12);

        assert_abs_diff_eq!(out[1].along_track_m, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1].cross_track_m, 1.0, epsilon = 1e-12);

        assert_abs_diff_eq!(out[2].along_track_m, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2].cross_track_m, -3.0, epsilon = 1e-12);

        assert!(transform(&[], &target, &frame).is_empty());
    }

    #[test]
    fn test_project_trajectory_skips() {
        let projector = Projector::new(&ProjParams::default()).unwrap();
        let records = vec![
            TrajectoryRecord::new().with("lat", "35.0").with("lon", "135.0"),
            TrajectoryRecord::new().with("lat", "35.0"),
            TrajectoryRecord::new().with("lat", "abc").with("lon", "135.0"),
            TrajectoryRecord::new().with("lat", "95.0").with("lon", "135.0"),
            TrajectoryRecord::new().with("lat", "35.001").with("lon", "135.0"),
        ];

        let traj = project_trajectory(&records, &projector);
        assert_eq!(traj.points.len(), 2);
        assert_eq!(traj.num_skipped, 1);
        assert!(traj.points[1].y > 110.0);
    }
}
