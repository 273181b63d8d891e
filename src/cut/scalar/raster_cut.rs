//! Bounded raster image cut. Image decoding itself is an external
//! collaborator (Non-goal); this type carries only what the planner and
//! travel optimizer need: a bounding box and pixel step, so the cut can
//! be scheduled and its travel estimated as a boustrophedon bbox scan.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct RasterCut {
    pub common: CutCommon,
    top_left: Point,
    bottom_right: Point,
    pub step: Real,
}

impl RasterCut {
    pub fn new(top_left: Point, bottom_right: Point, step: Real) -> Self {
        Self {
            common: CutCommon::new(),
            top_left: top_left.round_to_device(),
            bottom_right: bottom_right.round_to_device(),
            step: step.max(1.0),
        }
    }

    pub fn start(&self) -> Point {
        if self.common.normal {
            self.top_left
        } else {
            self.bottom_right
        }
    }

    pub fn end(&self) -> Point {
        if self.common.normal {
            self.bottom_right
        } else {
            self.top_left
        }
    }

    pub fn width(&self) -> Real {
        (self.bottom_right.x - self.top_left.x).abs()
    }

    pub fn height(&self) -> Real {
        (self.bottom_right.y - self.top_left.y).abs()
    }

    /// Total boustrophedon scan length for the bbox at this `step`.
    pub fn length(&self) -> Real {
        let rows = (self.height() / self.step).floor().max(0.0) + 1.0;
        rows * self.width()
    }

    /// Boustrophedon scan steps across the bbox, laser on for every row.
    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        let mut out = Vec::new();
        let (x0, y0) = (self.top_left.x as i64, self.top_left.y as i64);
        let (x1, _) = (self.bottom_right.x as i64, self.bottom_right.y as i64);
        let rows = ((self.height() / self.step).floor() as i64).max(0);
        for row in 0..=rows {
            let y = y0 + (row as Real * self.step) as i64;
            if row % 2 == 0 {
                out.push((x0, y, true));
                out.push((x1, y, true));
            } else {
                out.push((x1, y, true));
                out.push((x0, y, true));
            }
        }
        out
    }

    pub fn point(&self, t: Real) -> Point {
        let (s, e) = (self.start(), self.end());
        Point::new(s.x + (e.x - s.x) * t, s.y + (e.y - s.y) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_when_step_exceeds_height() {
        let cut = RasterCut::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0), 100.0);
        let steps = cut.generator();
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn boustrophedon_alternates_direction() {
        let cut = RasterCut::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0), 10.0);
        let steps = cut.generator();
        assert_eq!(steps[0].0, 0);
        assert_eq!(steps[2].0, 10);
    }
}
