//! Utility library for the cross-track analysis workspace

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod logger;
pub mod maths;
pub mod params;
pub mod session;
pub mod time;
