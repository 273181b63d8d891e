//! Degenerate, standalone, non-reversible dwell cut. Grounded on
//! `meerk40t/core/cutcode/setorigincut.py`: a `DwellCut` with
//! `dwell_time == 0` plays the role of the original's separate
//! `SetOriginCut` (spec §3 [SUPPLEMENT]) — a marker that repositions the
//! origin without burning, folded in here to avoid a near-duplicate
//! primitive variant.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct DwellCut {
    pub common: CutCommon,
    position: Point,
    /// Dwell time in milliseconds. `0` marks a bare origin-set (no burn).
    pub dwell_time: u32,
}

impl DwellCut {
    pub fn new(position: Point, dwell_time: u32) -> Self {
        let mut common = CutCommon::new();
        common.first = true;
        common.last = true;
        Self {
            common,
            position: position.round_to_device(),
            dwell_time,
        }
    }

    /// A bare origin-set marker, per the folded `SetOriginCut` semantics.
    pub fn set_origin(position: Point) -> Self {
        Self::new(position, 0)
    }

    pub fn is_set_origin(&self) -> bool {
        self.dwell_time == 0
    }

    pub fn start(&self) -> Point {
        self.position
    }

    pub fn end(&self) -> Point {
        self.position
    }

    pub fn length(&self) -> Real {
        0.0
    }

    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        vec![(self.position.x as i64, self.position.y as i64, false)]
    }

    pub fn point(&self, _t: Real) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_is_set_origin() {
        let cut = DwellCut::set_origin(Point::new(4.0, 5.0));
        assert!(cut.is_set_origin());
        assert_eq!(cut.start(), Point::new(4.0, 5.0));
    }

    #[test]
    fn length_is_always_zero() {
        let cut = DwellCut::new(Point::new(1.0, 1.0), 500);
        assert_eq!(cut.length(), 0.0);
    }
}
