//! # Cross track library.
//!
//! This library holds the trajectory analysis used by the cross track executable. A trajectory
//! log is reduced to its turn segment, projected onto a local plane and expressed relative to a
//! baseline through a target point, alongside the cross track errors the vehicle reported.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Analysis pipeline - runs every stage over the records of one file
pub mod analysis;

/// Baseline frame - orthonormal axes along and across the baseline
pub mod baseline;

/// Batch driver - analyses many files independently
pub mod batch;

/// Cross track samples - reported errors over the turn segment
pub mod cross_track;

/// Result export - CSV archives and the batch summary
pub mod export;

/// Overlay guides - baseline and perpendicular guide lines for plotting
pub mod overlay;

/// Executable parameters
pub mod params;

/// Geodetic projection - latitude/longitude onto a local plane
pub mod proj;

/// Trajectory records and the values derived from them
pub mod record;

/// Reference fix extraction
pub mod reference;

/// Record source - reads records from CSV
pub mod source;

/// Coordinate transformation into the baseline frame
pub mod transform;

/// Turn segment filter
pub mod turn_filter;
