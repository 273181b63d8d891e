//! Crate-wide scalar type and geometric constants.

/// The scalar type used throughout the planner. Cut endpoints are stored as
/// rounded integer device units (see [`crate::geom::point::Point`]), but all
/// lengths, angles, and intermediate math use `Real`.
pub type Real = f64;

/// A small epsilon for geometric comparisons (containment tests, degenerate
/// segment detection).
pub const EPSILON: Real = 1e-9;

/// Archimedes' constant (pi).
pub const PI: Real = core::f64::consts::PI;

/// pi/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (tau).
pub const TAU: Real = core::f64::consts::TAU;

// ---------------------------------------------------------------
// Unit conversion (device units are treated as mm-equivalent by default)
// ---------------------------------------------------------------
pub const MM: Real = 1.0;
pub const CM: Real = 10.0;
pub const INCH: Real = 25.4;
pub const METER: Real = 1000.0;

/// Maximum sweep, in degrees, of a single arc-to-cubic segment (spec §4.2).
pub const MAX_ARC_SWEEP_DEG: Real = 30.0;

/// Gap, in device units, within which the travel optimizer prefers to
/// continue along a cut's existing `next`/`previous` link rather than
/// searching for a new nearest neighbor (spec §4.6: "~1/20\"").
pub const CONTINUATION_GAP: Real = INCH / 20.0;
