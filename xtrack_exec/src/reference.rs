//! # Reference fix extraction
//!
//! The baseline of a file is defined by a target point and a heading. These are carried on the
//! trajectory records themselves, and the first record carrying a complete set is used.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::record::{ReferenceFix, TrajectoryRecord};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Names of the fields making up the reference fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceFields {
    pub target_lat: String,
    pub target_lon: String,
    pub heading_deg: String,
    pub offset_deg: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for ReferenceFields {
    fn default() -> Self {
        Self {
            target_lat: "target_lat".into(),
            target_lon: "target_lon".into(),
            heading_deg: "heading_deg".into(),
            offset_deg: "offset_deg".into(),
        }
    }
}

impl ReferenceFields {
    /// The required field names, in the order they are reported.
    pub fn names(&self) -> Vec<String> {
        vec![
            self.target_lat.clone(),
            self.target_lon.clone(),
            self.heading_deg.clone(),
            self.offset_deg.clone(),
        ]
    }

    /// Read a complete fix from one record.
    fn read(&self, record: &TrajectoryRecord) -> Option<ReferenceFix> {
        Some(ReferenceFix {
            target_lat_deg: record.get_f64(&self.target_lat)?,
            target_lon_deg: record.get_f64(&self.target_lon)?,
            heading_deg: record.get_f64(&self.heading_deg)?,
            offset_deg: record.get_f64(&self.offset_deg)?,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Find the reference fix of a file.
///
/// Records are scanned in their original order, before any turn filtering, and the first record
/// on which every reference field is present and parses as a finite number wins.
pub fn extract_reference<'a, I>(records: I, fields: &ReferenceFields) -> Option<ReferenceFix>
where
    I: IntoIterator<Item = &'a TrajectoryRecord>,
{
    records.into_iter().find_map(|r| fields.read(r))
}

#[cfg(test)]
mod test {
    use super::*;

    fn fix_record(lat: &str, lon: &str, heading: &str, offset: &str) -> TrajectoryRecord {
        TrajectoryRecord::new()
            .with("target_lat", lat)
            .with("target_lon", lon)
            .with("heading_deg", heading)
            .with("offset_deg", offset)
    }

    #[test]
    fn test_first_complete_record_wins() {
        let records = vec![
            TrajectoryRecord::new().with("lat", "35.0"),
            fix_record("35.1", "135.1", "", "0"),
            fix_record("35.2", "135.2", "abc", "0"),
            fix_record(" 35.3 ", "135.3", "90", "10"),
            fix_record("35.4", "135.4", "45", "0"),
        ];

        let fix = extract_reference(&records, &ReferenceFields::default()).unwrap();
        assert_eq!(
            fix,
            ReferenceFix {
                target_lat_deg: 35.3,
                target_lon_deg: 135.3,
                heading_deg: 90.0,
                offset_deg: 10.0,
            }
        );
    }

    #[test]
    fn test_missing_reference() {
        let records = vec![
            fix_record("35.1", "135.1", "90", ""),
            fix_record("35.1", "NaN", "90", "0"),
        ];

        assert_eq!(
            extract_reference(&records, &ReferenceFields::default()),
            None
        );
        assert_eq!(
            extract_reference(&Vec::<TrajectoryRecord>::new(), &ReferenceFields::default()),
            None
        );
    }

    #[test]
    fn test_custom_field_names() {
        let fields = ReferenceFields {
            target_lat: "tlat".into(),
            target_lon: "tlon".into(),
            ..Default::default()
        };
        let records = vec![TrajectoryRecord::new()
            .with("tlat", "1")
            .with("tlon", "2")
            .with("heading_deg", "3")
            .with("offset_deg", "4")];

        let fix = extract_reference(&records, &fields).unwrap();
        assert_eq!(fix.target_lon_deg, 2.0);
        assert_eq!(
            fields.names(),
            vec!["tlat", "tlon", "heading_deg", "offset_deg"]
        );
    }
}
