//! Quadratic Bezier cut. Grounded on
//! `meerk40t/core/cutcode/quadcut.py`.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::plot::quad::plot_quad_bezier;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct QuadCut {
    pub common: CutCommon,
    start: Point,
    control: Point,
    end: Point,
}

impl QuadCut {
    pub fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            common: CutCommon::new(),
            start: start.round_to_device(),
            control: control.round_to_device(),
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

    /// The control point does not flip with `normal` in the original: a
    /// reversed quad still curves through the same control point, just
    /// traversed the other way.
    pub fn control(&self) -> Point {
        self.control
    }

    /// Approximate length: control-polyline length, per spec §4.1.
    pub fn length(&self) -> Real {
        self.start.distance(&self.control) + self.control.distance(&self.end)
    }

    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        let (s, c, e) = (self.start(), self.control(), self.end());
        plot_quad_bezier(s.x as i64, s.y as i64, c.x as i64, c.y as i64, e.x as i64, e.y as i64)
    }

    pub fn point(&self, t: Real) -> Point {
        let (s, c, e) = (self.start(), self.control(), self.end());
        let u = 1.0 - t;
        Point::new(
            u * u * s.x + 2.0 * u * t * c.x + t * t * e.x,
            u * u * s.y + 2.0 * u * t * c.y + t * t * e.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_sample_at_boundaries() {
        let cut = QuadCut::new(Point::new(0.0, 0.0), Point::new(5.0, 10.0), Point::new(10.0, 0.0));
        assert_eq!(cut.point(0.0), cut.start());
        assert_eq!(cut.point(1.0), cut.end());
    }

    #[test]
    fn length_is_control_polyline() {
        let cut = QuadCut::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0));
        assert!((cut.length() - 10.0).abs() < 1e-9);
    }
}
