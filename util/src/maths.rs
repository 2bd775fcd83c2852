//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// The return value `r` satisfies `0.0 <= r < rhs.abs()` in most cases. Due to floating point
/// round-off it can result in `r == rhs.abs()` when `lhs` is negative and much smaller than
/// `rhs` in magnitude.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle in degrees into the range [0, 360).
pub fn wrap_deg_360<T>(value: T) -> T
where
    T: Float,
{
    let full = T::from(360.0).unwrap_or_else(T::max_value);
    let wrapped = rem_euclid(value, full);

    // Round-off case documented on rem_euclid
    if wrapped >= full {
        T::zero()
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into the range [-pi, pi).
pub fn wrap_pi<T>(value: T) -> T
where
    T: Float,
{
    let pi = T::from(std::f64::consts::PI).unwrap_or_else(T::max_value);
    let tau = pi + pi;

    let wrapped = rem_euclid(value + pi, tau) - pi;
    if wrapped >= pi {
        wrapped - tau
    } else {
        wrapped
    }
}
