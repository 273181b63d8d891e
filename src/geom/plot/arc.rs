//! Arc-to-cubic decomposition (spec §4.2). An arc is split into chords of
//! at most [`MAX_ARC_SWEEP_DEG`] degrees; each chord is approximated by a
//! single cubic Bezier using the standard "magic number" construction
//! (Riskus, *Approximation of a Cubic Bezier Curve by Circular Arcs and
//! Vice Versa*; the same formula `ZinglPlotter.py`'s arc helpers lean on):
//!
//! ```text
//! alpha = sin(delta) * (sqrt(4 + 3*tan^2(delta/2)) - 1) / 3
//! ```
//!
//! where `delta` is the chord's sweep in radians. The control points sit
//! at distance `alpha * radius` along the tangent at each chord endpoint.

use crate::float_types::{Real, MAX_ARC_SWEEP_DEG};
use crate::geom::point::Point;

/// One cubic Bezier arc chord: start, two control points, end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicChord {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// Decompose a circular arc into cubic chords of at most
/// [`MAX_ARC_SWEEP_DEG`] each. `sweep` is signed: positive is
/// counterclockwise, negative clockwise, matching `start_angle +
/// sweep == end_angle`.
pub fn arc_to_cubics(center: Point, radius: Real, start_angle: Real, sweep: Real) -> Vec<CubicChord> {
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    let max_sweep_rad = MAX_ARC_SWEEP_DEG.to_radians();
    let segment_count = (sweep.abs() / max_sweep_rad).ceil().max(1.0) as u32;
    let delta = sweep / segment_count as Real;

    let mut chords = Vec::with_capacity(segment_count as usize);
    let mut angle = start_angle;
    for _ in 0..segment_count {
        chords.push(arc_chord_to_cubic(center, radius, angle, delta));
        angle += delta;
    }
    chords
}

/// A single chord, assumed `|delta| <= MAX_ARC_SWEEP_DEG` for fidelity
/// (the formula is exact for any sweep under a half-circle, but accuracy
/// degrades beyond that).
fn arc_chord_to_cubic(center: Point, radius: Real, angle: Real, delta: Real) -> CubicChord {
    let start = center.polar(angle, radius);
    let end = center.polar(angle + delta, radius);

    let alpha = delta.sin() * ((4.0 + 3.0 * (delta / 2.0).tan().powi(2)).sqrt() - 1.0) / 3.0;
    let handle_len = alpha * radius;

    // Tangent direction is perpendicular to the radius, oriented with the
    // sweep's sign.
    let c1 = start.polar(angle + core::f64::consts::FRAC_PI_2, handle_len);
    let c2 = end.polar(angle + delta + core::f64::consts::FRAC_PI_2 + core::f64::consts::PI, handle_len);

    CubicChord { start, c1, c2, end }
}
