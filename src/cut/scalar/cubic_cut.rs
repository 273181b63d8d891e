//! Cubic Bezier cut. Grounded on `meerk40t/core/cutcode/cubiccut.py`.
//! Unlike `QuadCut`, the original flips which control point is "first"
//! (`c1`/`c2`) with `normal`; this is preserved since the control points
//! themselves become directional under reversal.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::plot::cubic::plot_cubic_bezier;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct CubicCut {
    pub common: CutCommon,
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
}

impl CubicCut {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            common: CutCommon::new(),
            start: start.round_to_device(),
            control1,
            control2,
            end: end.round_to_device(),
        }
    }

    pub fn start(&self) -> Point {
        if self.common.normal {
            self.start
        } else {
            self.end
        }
    }

    pub fn end(&self) -> Point {
        if self.common.normal {
            self.end
        } else {
            self.start
        }
    }

    pub fn c1(&self) -> Point {
        if self.common.normal {
            self.control1
        } else {
            self.control2
        }
    }

    pub fn c2(&self) -> Point {
        if self.common.normal {
            self.control2
        } else {
            self.control1
        }
    }

    pub fn length(&self) -> Real {
        self.start.distance(&self.c1()) + self.c1().distance(&self.c2()) + self.c2().distance(&self.end)
    }

    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        let (s, c1, c2, e) = (self.start(), self.c1(), self.c2(), self.end());
        plot_cubic_bezier(
            s.x as i64, s.y as i64,
            c1.x as i64, c1.y as i64,
            c2.x as i64, c2.y as i64,
            e.x as i64, e.y as i64,
        )
    }

    pub fn point(&self, t: Real) -> Point {
        let (s, c1, c2, e) = (self.start(), self.c1(), self.c2(), self.end());
        let u = 1.0 - t;
        Point::new(
            u * u * u * s.x + 3.0 * u * u * t * c1.x + 3.0 * u * t * t * c2.x + t * t * t * e.x,
            u * u * u * s.y + 3.0 * u * u * t * c1.y + 3.0 * u * t * t * c2.y + t * t * t * e.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_swaps_control_points() {
        let mut cut = CubicCut::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        );
        let (c1, c2) = (cut.c1(), cut.c2());
        cut.common.normal = false;
        assert_eq!(cut.c1(), c2);
        assert_eq!(cut.c2(), c1);
    }

    #[test]
    fn endpoints_sample_at_boundaries() {
        let cut = CubicCut::new(
            Point::new(0.0, 0.0),
            Point::new(2.0, 5.0),
            Point::new(8.0, 5.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(cut.point(0.0), cut.start());
        assert_eq!(cut.point(1.0), cut.end());
    }
}
