//! # Trajectory records
//!
//! A record is one row of a trajectory log: a mapping from field name to raw text. Fields may be
//! absent or empty, and every accessor treats both the same way.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Latitude of a trajectory point in degrees
pub const FIELD_LAT: &str = "lat";

/// Longitude of a trajectory point in degrees
pub const FIELD_LON: &str = "lon";

/// Turn status code of the record
pub const FIELD_TURN_STATUS: &str = "turn_status";

/// Cross track error reported by the vehicle
pub const FIELD_CROSS_TRACK_ERROR: &str = "cross_track_error";

/// Timestamp of the record, carried but never used for ordering
pub const FIELD_TIMESTAMP: &str = "timestamp";

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A point in the planar projection frame, metres east (x) and north (y) of the projection
/// centre.
pub type ProjectedPoint = Vector2<f64>;

/// One row of an input trajectory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryRecord {
    fields: HashMap<String, String>,
}

/// The reference fix for the baseline, taken from the first complete record of a file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFix {
    pub target_lat_deg: f64,
    pub target_lon_deg: f64,
    pub heading_deg: f64,
    pub offset_deg: f64,
}

/// A point expressed relative to the baseline through the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineRelativePoint {
    /// Signed distance along the perpendicular axis, positive to the right of the baseline
    pub cross_track_m: f64,

    /// Signed distance along the baseline axis, positive ahead of the target
    pub along_track_m: f64,
}

/// A cross track error reported by the vehicle at a given position in the turn segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossTrackSample {
    /// Position of the record within the filtered turn segment
    pub index: usize,

    pub error_m: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TrajectoryRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style setter, mostly useful for constructing records in code.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, field: K, value: V) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Get the trimmed value of a field, or `None` if it is absent or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Get a field as a finite float.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Get a field as an integer. Only integer text is accepted, `"1.0"` is not a status.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(|v| v.parse::<i64>().ok())
    }

    /// Number of fields held by the record, including blank ones.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TrajectoryRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accessors() {
        let rec = TrajectoryRecord::new()
            .with("lat", " 35.5 ")
            .with("blank", "   ")
            .with("status", "3")
            .with("float_status", "1.0")
            .with("inf", "inf")
            .with("word", "abc");

        assert_eq!(rec.get("lat"), Some("35.5"));
        assert_eq!(rec.get("blank"), None);
        assert_eq!(rec.get("missing"), None);

        assert_eq!(rec.get_f64("lat"), Some(35.5));
        assert_eq!(rec.get_f64("inf"), None);
        assert_eq!(rec.get_f64("word"), None);

        assert_eq!(rec.get_i64("status"), Some(3));
        assert_eq!(rec.get_i64("float_status"), None);

        assert_eq!(rec.len(), 6);
    }

    #[test]
    fn test_from_iter() {
        let rec: TrajectoryRecord = vec![("a", "1"), ("b", "")].into_iter().collect();
        assert_eq!(rec.get_i64("a"), Some(1));
        assert_eq!(rec.get("b"), None);
        assert!(!rec.is_empty());
    }
}
