//! Containment analyzer (spec §4.3): decides nesting of closed
//! `CutGroup`s and builds the `contains`/`inside` DAG consumed by the
//! inner-first travel optimizer.

pub mod scanbeam;

use crate::cut::{CutGroup, CutNode};
use crate::float_types::Real;
use crate::geom::Point;
use scanbeam::{polygon_contains, sample_polygon};

const OUTER_RESOLUTION: usize = 1001;
const INNER_SAMPLES: usize = 101;

fn group_polygon(group: &CutGroup, resolution: usize) -> Vec<Point> {
    let flat: Vec<&CutNode> = group.iter_flat().collect();
    if flat.is_empty() {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(resolution);
    for i in 0..resolution {
        let t = i as Real / resolution as Real;
        let idx = ((t * flat.len() as Real) as usize).min(flat.len() - 1);
        let local_t = (t * flat.len() as Real) - idx as Real;
        if let Some(p) = flat[idx].point(local_t).or_else(|| flat[idx].start()) {
            points.push(p);
        }
    }
    points
}

fn bbox(points: &[Point]) -> Option<(Point, Point)> {
    if points.is_empty() {
        return None;
    }
    let (mut min, mut max) = (points[0], points[0]);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

fn bbox_contains(outer: (Point, Point), inner: (Point, Point), tolerance: Real) -> bool {
    outer.0.x - tolerance <= inner.0.x
        && outer.0.y - tolerance <= inner.0.y
        && outer.1.x + tolerance >= inner.1.x
        && outer.1.y + tolerance >= inner.1.y
}

/// Decide whether closed group `inner` lies wholly inside closed group
/// `outer`, within `tolerance` device units (spec §4.3 steps 1-5).
pub fn contains(outer: &CutGroup, inner: &CutGroup, tolerance: Real) -> bool {
    if !outer.closed() || !inner.closed() {
        return false;
    }
    let outer_poly = group_polygon(outer, OUTER_RESOLUTION);
    let inner_poly = group_polygon(inner, OUTER_RESOLUTION);
    if outer_poly.is_empty() || inner_poly.is_empty() {
        return false;
    }

    let (outer_bbox, inner_bbox) = match (bbox(&outer_poly), bbox(&inner_poly)) {
        (Some(o), Some(i)) => (o, i),
        _ => return false,
    };
    if outer_bbox == inner_bbox && std::ptr::eq(outer, inner) {
        return false;
    }
    if !bbox_contains(outer_bbox, inner_bbox, tolerance) {
        return false;
    }

    let samples = sample_polygon(&inner_poly, INNER_SAMPLES);
    polygon_contains(&outer_poly, &samples, tolerance)
}

/// Identification pass: for every ordered pair `(outer, inner)` among a
/// `CutGroup`'s direct children, test containment and populate
/// `outer.contains` / `inner.inside` by sibling index. Returns `true` if
/// any relation was discovered (the caller sets `constrained = true`).
pub fn inner_first_ident(children: &mut [CutNode], tolerance: Real) -> bool {
    let n = children.len();
    let mut contains_rel: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut inside_rel: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut known_inverse: std::collections::HashSet<(usize, usize)> = Default::default();

    // Snapshot polygons once; containment doesn't mutate children.
    let polygons: Vec<Option<(Vec<Point>, (Point, Point))>> = children
        .iter()
        .map(|c| match c {
            CutNode::Group(g) if g.closed() => {
                let poly = group_polygon(g, OUTER_RESOLUTION);
                bbox(&poly).map(|b| (poly, b))
            }
            _ => None,
        })
        .collect();

    for i in 0..n {
        let Some((outer_poly, outer_bbox)) = &polygons[i] else { continue };
        for j in 0..n {
            if i == j || known_inverse.contains(&(i, j)) {
                continue;
            }
            let Some((inner_poly, inner_bbox)) = &polygons[j] else { continue };
            if *outer_bbox == *inner_bbox && i == j {
                continue;
            }
            if !bbox_contains(*outer_bbox, *inner_bbox, tolerance) {
                continue;
            }
            let samples = sample_polygon(inner_poly, INNER_SAMPLES);
            if polygon_contains(outer_poly, &samples, tolerance) {
                contains_rel[i].push(j);
                inside_rel[j].push(i);
                known_inverse.insert((j, i));
            }
        }
    }

    let mut any = false;
    for (i, node) in children.iter_mut().enumerate() {
        if let CutNode::Group(g) = node {
            if !contains_rel[i].is_empty() {
                g.contains = Some(contains_rel[i].clone());
                any = true;
            }
            if !inside_rel[i].is_empty() {
                g.inside = Some(inside_rel[i].clone());
                any = true;
            }
        }
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;

    fn closed_square(side: Real, origin: Point) -> CutGroup {
        let p = [
            origin,
            Point::new(origin.x + side, origin.y),
            Point::new(origin.x + side, origin.y + side),
            Point::new(origin.x, origin.y + side),
        ];
        let mut children = Vec::new();
        for w in p.windows(2) {
            children.push(CutNode::Line(LineCut::new(w[0], w[1])));
        }
        children.push(CutNode::Line(LineCut::new(p[3], p[0])));
        let mut g = CutGroup::new(children);
        g.set_closed(true);
        g
    }

    #[test]
    fn nested_squares_build_dag() {
        let outer = CutNode::Group(closed_square(100.0, Point::ORIGIN));
        let medium = CutNode::Group(closed_square(60.0, Point::new(20.0, 20.0)));
        let small = CutNode::Group(closed_square(20.0, Point::new(40.0, 40.0)));
        let mut children = vec![outer, medium, small];
        let any = inner_first_ident(&mut children, 0.0);
        assert!(any);
        let CutNode::Group(outer_g) = &children[0] else { unreachable!() };
        assert_eq!(outer_g.contains.as_ref().unwrap(), &vec![1, 2]);
        let CutNode::Group(small_g) = &children[2] else { unreachable!() };
        assert!(small_g.inside.as_ref().unwrap().contains(&0));
    }

    #[test]
    fn disjoint_groups_have_no_relations() {
        let a = CutNode::Group(closed_square(10.0, Point::ORIGIN));
        let b = CutNode::Group(closed_square(10.0, Point::new(50.0, 50.0)));
        let mut children = vec![a, b];
        assert!(!inner_first_ident(&mut children, 0.0));
    }
}
