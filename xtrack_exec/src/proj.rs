//! # Geodetic projection
//!
//! Projects latitude/longitude onto a local plane using a spherical azimuthal equidistant
//! projection about a fixed centre. Distances and bearings measured from the centre are
//! preserved, which keeps a trajectory near the centre metrically faithful.
//!
//! The output frame has x pointing east and y pointing north, in metres.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use util::maths::wrap_pi;

use crate::record::ProjectedPoint;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// IUGG mean Earth radius
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Angular distance from the antipode below which a point cannot be projected.
const ANTIPODE_TOLERANCE_RAD: f64 = 1e-7;

/// Angular distance below which the scale factor is taken as exactly one.
const CENTRE_TOLERANCE_RAD: f64 = 1e-12;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjParams {
    pub center_lat_deg: f64,
    pub center_lon_deg: f64,
    pub earth_radius_m: f64,
}

/// A validated projection, ready to project points.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    params: ProjParams,

    center_lat_rad: f64,
    center_lon_rad: f64,

    sin_center_lat: f64,
    cos_center_lat: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjError {
    #[error("Coordinate is not finite (lat = {0}, lon = {1})")]
    NonFinite(f64, f64),

    #[error("Latitude {0} deg is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} deg is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("Point (lat = {0}, lon = {1}) is antipodal to the projection centre")]
    Antipodal(f64, f64),

    #[error("Earth radius must be finite and positive, found {0}")]
    InvalidRadius(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for ProjParams {
    fn default() -> Self {
        Self {
            center_lat_deg: 35.0,
            center_lon_deg: 135.0,
            earth_radius_m: MEAN_EARTH_RADIUS_M,
        }
    }
}

impl Projector {
    /// Build a projector, validating the centre and the radius.
    pub fn new(params: &ProjParams) -> Result<Self, ProjError> {
        if !(params.earth_radius_m.is_finite() && params.earth_radius_m > 0.0) {
            return Err(ProjError::InvalidRadius(params.earth_radius_m));
        }

        check_coords(params.center_lat_deg, params.center_lon_deg)?;

        let center_lat_rad = params.center_lat_deg.to_radians();

        Ok(Self {
            params: *params,
            center_lat_rad,
            center_lon_rad: params.center_lon_deg.to_radians(),
            sin_center_lat: center_lat_rad.sin(),
            cos_center_lat: center_lat_rad.cos(),
        })
    }

    pub fn params(&self) -> &ProjParams {
        &self.params
    }

    /// Project a geodetic coordinate onto the plane.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> Result<ProjectedPoint, ProjError> {
        check_coords(lat_deg, lon_deg)?;

        let lat_rad = lat_deg.to_radians();
        let dlon_rad = wrap_pi(lon_deg.to_radians() - self.center_lon_rad);

        let (sin_lat, cos_lat) = lat_rad.sin_cos();
        let (sin_dlon, cos_dlon) = dlon_rad.sin_cos();

        // Angular distance from the centre, haversine form
        let hav = ((lat_rad - self.center_lat_rad) / 2.0).sin().powi(2)
            + self.cos_center_lat * cos_lat * (dlon_rad / 2.0).sin().powi(2);
        let hav = hav.clamp(0.0, 1.0);
        let c = 2.0 * hav.sqrt().atan2((1.0 - hav).sqrt());

        if std::f64::consts::PI - c < ANTIPODE_TOLERANCE_RAD {
            return Err(ProjError::Antipodal(lat_deg, lon_deg));
        }

        let k = if c < CENTRE_TOLERANCE_RAD {
            1.0
        } else {
            c / c.sin()
        };

        let r_k = self.params.earth_radius_m * k;

        Ok(ProjectedPoint::new(
            r_k * cos_lat * sin_dlon,
            r_k * (self.cos_center_lat * sin_lat - self.sin_center_lat * cos_lat * cos_dlon),
        ))
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn check_coords(lat_deg: f64, lon_deg: f64) -> Result<(), ProjError> {
    if !(lat_deg.is_finite() && lon_deg.is_finite()) {
        return Err(ProjError::NonFinite(lat_deg, lon_deg));
    }
    if lat_deg.abs() > 90.0 {
        return Err(ProjError::LatitudeOutOfRange(lat_deg));
    }
    if lon_deg.abs() > 180.0 {
        return Err(ProjError::LongitudeOutOfRange(lon_deg));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centre_is_origin() {
        let proj = Projector::new(&ProjParams::default()).unwrap();
        let p = proj.project(35.0, 135.0).unwrap();

        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_and_bearing_preserved() {
        let proj = Projector::new(&ProjParams::default()).unwrap();
        let metres_per_deg = MEAN_EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

        // Due north along the central meridian
        let north = proj.project(36.0, 135.0).unwrap();
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(north.y, metres_per_deg, epsilon = 1e-4);

        // Due south
        let south = proj.project(34.0, 135.0).unwrap();
        assert_abs_diff_eq!(south.y, -metres_per_deg, epsilon = 1e-4);

        // East of the centre on the equator, projected about the origin
        let equatorial = Projector::new(&ProjParams {
            center_lat_deg: 0.0,
            center_lon_deg: 0.0,
            ..Default::default()
        })
        .unwrap();
        let east = equatorial.project(0.0, 10.0).unwrap();
        assert_abs_diff_eq!(east.x, 10.0 * metres_per_deg, epsilon = 1e-4);
        assert_abs_diff_eq!(east.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_small_offsets_east_and_north() {
        let proj = Projector::new(&ProjParams::default()).unwrap();
        let p = proj.project(35.001, 135.001).unwrap();

        // Roughly 91 m east and 111 m north at this latitude
        assert!(p.x > 90.0 && p.x < 92.0, "x = {}", p.x);
        assert!(p.y > 110.0 && p.y < 112.0, "y = {}", p.y);
    }

    #[test]
    fn test_longitude_wraps_across_antimeridian() {
        let proj = Projector::new(&ProjParams {
            center_lat_deg: 0.0,
            center_lon_deg: 179.5,
            ..Default::default()
        })
        .unwrap();

        let p = proj.project(0.0, -179.5).unwrap();
        let metres_per_deg = MEAN_EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert_abs_diff_eq!(p.x, metres_per_deg, epsilon = 1e-4);
    }

    #[test]
    fn test_errors() {
        let proj = Projector::new(&ProjParams::default()).unwrap();

        assert_eq!(
            proj.project(91.0, 0.0),
            Err(ProjError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            proj.project(0.0, -180.5),
            Err(ProjError::LongitudeOutOfRange(-180.5))
        );
        assert!(matches!(
            proj.project(f64::NAN, 0.0),
            Err(ProjError::NonFinite(..))
        ));
        assert_eq!(
            proj.project(-35.0, -45.0),
            Err(ProjError::Antipodal(-35.0, -45.0))
        );

        assert!(matches!(
            Projector::new(&ProjParams {
                earth_radius_m: 0.0,
                ..Default::default()
            }),
            Err(ProjError::InvalidRadius(_))
        ));
        assert!(matches!(
            Projector::new(&ProjParams {
                center_lat_deg: 100.0,
                ..Default::default()
            }),
            Err(ProjError::LatitudeOutOfRange(_))
        ));
    }
}
