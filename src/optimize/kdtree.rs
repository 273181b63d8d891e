//! A small hand-rolled 2D k-d tree. No example or pack crate offers one
//! (and fabricating a dependency is off the table, see DESIGN.md), so
//! this is grown in-house, matching spec §9's framing: the spatial
//! optimizer's contract is "correctness plus O(N log N) expected", not
//! k-d specifically — callers may fall back to linear scan for small
//! cells.

use crate::float_types::Real;
use crate::geom::Point;

#[derive(Debug)]
enum Node {
    Leaf,
    Split {
        point_idx: usize,
        axis: u8,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A static k-d tree over a fixed set of 2D points, indexed by their
/// position in the caller's original slice.
pub struct KdTree {
    points: Vec<Point>,
    root: Node,
}

impl KdTree {
    pub fn build(points: Vec<Point>) -> Self {
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let root = Self::build_node(&points, &mut indices, 0);
        Self { points, root }
    }

    fn build_node(points: &[Point], indices: &mut [usize], depth: usize) -> Node {
        if indices.is_empty() {
            return Node::Leaf;
        }
        let axis = (depth % 2) as u8;
        indices.sort_by(|&a, &b| {
            let (ka, kb) = if axis == 0 {
                (points[a].x, points[b].x)
            } else {
                (points[a].y, points[b].y)
            };
            ka.partial_cmp(&kb).unwrap()
        });
        let mid = indices.len() / 2;
        let point_idx = indices[mid];
        let (left_slice, rest) = indices.split_at_mut(mid);
        let right_slice = &mut rest[1..];
        let left = Self::build_node(points, left_slice, depth + 1);
        let right = Self::build_node(points, right_slice, depth + 1);
        Node::Split {
            point_idx,
            axis,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nearest neighbor to `query` among indices for which `available`
    /// returns `true`; returns `(index, distance)`.
    pub fn nearest(&self, query: Point, available: &dyn Fn(usize) -> bool) -> Option<(usize, Real)> {
        let mut best: Option<(usize, Real)> = None;
        Self::search(&self.root, &self.points, query, available, &mut best);
        best
    }

    fn search(
        node: &Node,
        points: &[Point],
        query: Point,
        available: &dyn Fn(usize) -> bool,
        best: &mut Option<(usize, Real)>,
    ) {
        let Node::Split { point_idx, axis, left, right } = node else {
            return;
        };
        let candidate = points[*point_idx];
        if available(*point_idx) {
            let d = query.distance(&candidate);
            if best.map_or(true, |(_, bd)| d < bd) {
                *best = Some((*point_idx, d));
            }
        }

        let diff = if *axis == 0 { query.x - candidate.x } else { query.y - candidate.y };
        let (near, far) = if diff < 0.0 { (left, right) } else { (right, left) };
        Self::search(near, points, query, available, best);
        if best.map_or(true, |(_, bd)| diff.abs() < bd) {
            Self::search(far, points, query, available, best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_closest_point() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(3.0, 4.0)];
        let tree = KdTree::build(points);
        let (idx, dist) = tree.nearest(Point::new(2.0, 3.0), &|_| true).unwrap();
        assert_eq!(idx, 2);
        assert!((dist - (2.0_f64).hypot(1.0)).abs() < 1e-9);
    }

    #[test]
    fn respects_availability_predicate() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let tree = KdTree::build(points);
        let (idx, _) = tree.nearest(Point::new(0.0, 0.0), &|i| i != 0).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn empty_tree_has_no_nearest() {
        let tree = KdTree::build(Vec::new());
        assert!(tree.nearest(Point::ORIGIN, &|_| true).is_none());
    }
}
