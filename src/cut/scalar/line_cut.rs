//! Bresenham-plottable line segment. Grounded on
//! `meerk40t/core/cutcode/linecut.py`.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::plot::line::plot_line;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct LineCut {
    pub common: CutCommon,
    start: Point,
    end: Point,
}

impl LineCut {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            common: CutCommon::new(),
            start: start.round_to_device(),
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

    pub fn length(&self) -> Real {
        self.start.distance(&self.end)
    }

    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        let (s, e) = (self.start(), self.end());
        plot_line(s.x as i64, s.y as i64, e.x as i64, e.y as i64)
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
    fn start_end_flip_on_reverse() {
        let mut cut = LineCut::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let (s, e) = (cut.start(), cut.end());
        cut.common.normal = false;
        assert_eq!(cut.start(), e);
        assert_eq!(cut.end(), s);
    }

    #[test]
    fn point_midpoint() {
        let cut = LineCut::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let mid = cut.point(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_length_is_zero() {
        let cut = LineCut::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert_eq!(cut.length(), 0.0);
    }
}
