//! # Overlay guides
//!
//! Geometry for drawing the baseline and its perpendicular over a trajectory in the projection
//! frame. The guides are scaled to the extent of the trajectory so they remain visible whatever
//! the size of the manoeuvre.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use crate::{baseline::BaselineFrame, record::ProjectedPoint};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Span used for an axis when there are not enough points to measure it
pub const DEFAULT_SPAN_M: f64 = 1000.0;

/// Guide scale as a fraction of the largest span
const SCALE_FACTOR: f64 = 0.8;

/// Extent of the baseline guide behind the target, in guide scales
const BASELINE_BEHIND: f64 = 1.5;

/// Extent of the baseline guide ahead of the target, in guide scales
const BASELINE_AHEAD: f64 = 0.5;

/// Half length of the perpendicular guide, in guide scales
const PERP_HALF_LEN: f64 = 0.5;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A line segment in the projection frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: ProjectedPoint,
    pub end: ProjectedPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayGuides {
    /// Length scale of the guides in metres
    pub scale_m: f64,

    /// Guide along the baseline, mostly behind the target
    pub baseline: Segment,

    /// Guide along the perpendicular, centred on the target
    pub perp: Segment,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl OverlayGuides {
    /// Compute the guides for a trajectory, or `None` if the trajectory is empty.
    pub fn new(
        points: &[ProjectedPoint],
        target: &ProjectedPoint,
        frame: &BaselineFrame,
    ) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let (x_span, y_span) = if points.len() > 1 {
            let (min, max) = points.iter().skip(1).fold((points[0], points[0]), |(min, max), p| {
                (min.inf(p), max.sup(p))
            });
            let span = max - min;
            (span.x, span.y)
        } else {
            (DEFAULT_SPAN_M, DEFAULT_SPAN_M)
        };

        let scale_m = SCALE_FACTOR * x_span.max(y_span);

        Some(Self {
            scale_m,
            baseline: Segment {
                start: target - frame.unit * (BASELINE_BEHIND * scale_m),
                end: target + frame.unit * (BASELINE_AHEAD * scale_m),
            },
            perp: Segment {
                start: target - frame.perp * (PERP_HALF_LEN * scale_m),
                end: target + frame.perp * (PERP_HALF_LEN * scale_m),
            },
        })
    }
}
