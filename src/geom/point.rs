//! 2D point with the scalar ops, distance/polar helpers, and convex-hull
//! generator the planner needs for containment sampling and travel distance.

use crate::float_types::Real;
use crate::geom::matrix::Matrix;
use geo::algorithm::ConvexHull;
use geo::{Coord, MultiPoint, Point as GeoPoint};
use std::ops::{Add, Mul, Sub};

/// A point in scene or device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn distance(&self, other: &Point) -> Real {
        (*self - *other).hypot()
    }

    #[inline]
    fn hypot(&self) -> Real {
        self.x.hypot(self.y)
    }

    /// Angle, in radians, of the vector from `self` to `other`.
    pub fn angle(&self, other: &Point) -> Real {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// A point `distance` away from `self` at `angle` radians.
    pub fn polar(&self, angle: Real, distance: Real) -> Point {
        Point::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Scale both components uniformly.
    pub fn scale(&self, factor: Real) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Convex hull (in CCW order) of a point cloud, used by the containment
    /// analyzer's outer-boundary fallbacks and by debug tooling. Delegates
    /// to `geo`'s quickhull rather than hand-rolling exact-arithmetic hull
    /// code (see DESIGN.md).
    pub fn convex_hull(points: &[Point]) -> Vec<Point> {
        if points.len() < 3 {
            return points.to_vec();
        }
        let mp: MultiPoint<Real> = points
            .iter()
            .map(|p| GeoPoint::new(p.x, p.y))
            .collect::<Vec<_>>()
            .into();
        let hull = mp.convex_hull();
        hull.exterior()
            .coords()
            .map(|c: &Coord<Real>| Point::new(c.x, c.y))
            .collect()
    }

    /// Rounds both coordinates to the nearest integer device unit (spec §3
    /// invariant 5: integer primitives round at construction).
    pub fn round_to_device(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Applying a `Matrix` to a `Point` performs the affine transform.
impl Mul<Matrix> for Point {
    type Output = Point;
    fn mul(self, m: Matrix) -> Point {
        m.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn polar_round_trips_distance() {
        let a = Point::new(10.0, -4.0);
        let b = a.polar(1.2345, 7.0);
        assert!((a.distance(&b) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn convex_hull_of_square_is_itself() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0), // interior point, must be dropped
        ];
        let hull = Point::convex_hull(&pts);
        assert_eq!(hull.len(), 5); // geo closes the ring (first == last)
        assert!(!hull.iter().any(|p| *p == Point::new(5.0, 5.0)));
    }
}
