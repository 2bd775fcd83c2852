//! # Baseline frame
//!
//! The baseline is the line through the target point along the commanded heading, corrected by
//! the heading offset. Headings are compass style: clockwise from north, so a heading of 90 deg
//! points east. The frame is made of two orthonormal axes:
//!
//! - `unit` points along the baseline,
//! - `perp` is `unit` rotated 90 deg clockwise, pointing to the right of the baseline.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use util::maths::wrap_deg_360;

use crate::record::ReferenceFix;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineFrame {
    /// Unit vector along the baseline
    pub unit: Vector2<f64>,

    /// Unit vector perpendicular to the baseline, to its right
    pub perp: Vector2<f64>,

    /// Heading of the baseline in degrees, not wrapped
    pub heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BaselineError {
    #[error("Baseline heading is not finite (heading = {0} deg, offset = {1} deg)")]
    NonFinite(f64, f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl BaselineFrame {
    /// Build the frame for a heading and its offset, both in degrees.
    pub fn new(heading_deg: f64, offset_deg: f64) -> Result<Self, BaselineError> {
        let baseline_heading_deg = heading_deg - offset_deg;

        if !baseline_heading_deg.is_finite() {
            return Err(BaselineError::NonFinite(heading_deg, offset_deg));
        }

        let (sin_h, cos_h) = baseline_heading_deg.to_radians().sin_cos();
        let unit = Vector2::new(sin_h, cos_h);

        Ok(Self {
            unit,
            perp: Vector2::new(unit.y, -unit.x),
            heading_deg: baseline_heading_deg,
        })
    }

    /// Build the frame from a reference fix.
    pub fn from_fix(fix: &ReferenceFix) -> Result<Self, BaselineError> {
        Self::new(fix.heading_deg, fix.offset_deg)
    }

    /// Baseline heading wrapped into [0, 360), for display only.
    pub fn display_heading_deg(&self) -> f64 {
        wrap_deg_360(self.heading_deg)
    }
}
