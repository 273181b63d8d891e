//! Grid-bucketed travel ordering for medium-sized batches (spec §4.6's
//! 100–500 cut tier). Grounded on `meerk40t/core/cutplan.py`'s spatial
//! pre-bucketing before nearest-neighbor search, re-expressed with a
//! hand-rolled k-d tree per cell ([`crate::optimize::kdtree`]) instead of
//! `scipy.spatial.cKDTree`.

use crate::float_types::Real;
use crate::geom::Point;
use crate::optimize::candidate::{start_point, Candidate};
use crate::optimize::kdtree::KdTree;

/// Cells with more than this many candidates get their own k-d tree;
/// smaller cells are searched with a plain linear scan (not worth the
/// tree-build overhead).
const KDTREE_CELL_THRESHOLD: usize = 20;

fn grid_size(n: usize) -> usize {
    ((n as Real / 10.0).sqrt() as usize).clamp(3, 20)
}

/// Order `batch` for minimal travel starting from `start`, by assigning
/// each candidate's start point to a grid cell, visiting cells in
/// boustrophedon (serpentine) order, and nearest-neighbor searching
/// within (and just past) each cell.
pub fn spatial_order(batch: &[Candidate], start: Point) -> Vec<(usize, bool)> {
    if batch.is_empty() {
        return Vec::new();
    }
    let starts: Vec<Point> = batch
        .iter()
        .map(|c| start_point(&c.cut, false).unwrap_or(start))
        .collect();

    let (min_x, max_x, min_y, max_y) = bounds(&starts);
    let g = grid_size(batch.len());
    let cell_w = ((max_x - min_x) / g as Real).max(1e-9);
    let cell_h = ((max_y - min_y) / g as Real).max(1e-9);

    let cell_of = |p: Point| -> (usize, usize) {
        let cx = (((p.x - min_x) / cell_w) as usize).min(g - 1);
        let cy = (((p.y - min_y) / cell_h) as usize).min(g - 1);
        (cx, cy)
    };

    let mut cells: Vec<Vec<usize>> = vec![Vec::new(); g * g];
    for (i, p) in starts.iter().enumerate() {
        let (cx, cy) = cell_of(*p);
        cells[cy * g + cx].push(i);
    }

    // Per-cell k-d tree construction has no cross-cell dependency (only
    // the traversal that consumes them does, via `curr`), so building
    // them is the one piece of this pass safe to parallelize. Boustrophedon
    // visitation order and per-cell NN results are unaffected either way.
    let trees = build_cell_trees(&cells, &starts);

    let mut used = vec![false; batch.len()];
    let mut order = Vec::with_capacity(batch.len());
    let mut curr = start;

    for cy in 0..g {
        // Boustrophedon: alternate scan direction per row to avoid
        // snapping back across the whole grid at every row boundary.
        let xs: Vec<usize> = if cy % 2 == 0 { (0..g).collect() } else { (0..g).rev().collect() };
        for cx in xs {
            let members: Vec<usize> = cells[cy * g + cx].iter().copied().filter(|&i| !used[i]).collect();
            if members.is_empty() {
                continue;
            }
            let picked = if let Some(tree) = &trees[cy * g + cx] {
                order_with_kdtree(&members, tree, &starts, &mut used, curr)
            } else {
                order_linear(&members, &starts, &mut used, curr)
            };
            for i in picked {
                order.push((i, false));
                curr = starts[i];
            }
        }
    }
    order
}

fn bounds(points: &[Point]) -> (Real, Real, Real, Real) {
    let mut min_x = Real::INFINITY;
    let mut max_x = Real::NEG_INFINITY;
    let mut min_y = Real::INFINITY;
    let mut max_y = Real::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (min_x, max_x, min_y, max_y)
}

fn order_linear(members: &[usize], starts: &[Point], used: &mut [bool], mut curr: Point) -> Vec<usize> {
    let mut remaining: Vec<usize> = members.to_vec();
    let mut out = Vec::with_capacity(members.len());
    while !remaining.is_empty() {
        let (pos, &best) = remaining
            .iter()
            .enumerate()
            .min_by(|(_, &a), (_, &b)| starts[a].distance(&curr).partial_cmp(&starts[b].distance(&curr)).unwrap())
            .unwrap();
        remaining.remove(pos);
        used[best] = true;
        curr = starts[best];
        out.push(best);
    }
    out
}

/// Build a k-d tree for every cell over `KDTREE_CELL_THRESHOLD` members,
/// `None` for the rest (those are searched linearly). Independent per
/// cell, so built via `rayon`'s `par_iter` under the `parallel` feature.
#[cfg(feature = "parallel")]
fn build_cell_trees(cells: &[Vec<usize>], starts: &[Point]) -> Vec<Option<KdTree>> {
    use rayon::prelude::*;
    cells
        .par_iter()
        .map(|members| {
            (members.len() > KDTREE_CELL_THRESHOLD)
                .then(|| KdTree::build(members.iter().map(|&i| starts[i]).collect()))
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_cell_trees(cells: &[Vec<usize>], starts: &[Point]) -> Vec<Option<KdTree>> {
    cells
        .iter()
        .map(|members| {
            (members.len() > KDTREE_CELL_THRESHOLD)
                .then(|| KdTree::build(members.iter().map(|&i| starts[i]).collect()))
        })
        .collect()
}

fn order_with_kdtree(members: &[usize], tree: &KdTree, starts: &[Point], used: &mut [bool], mut curr: Point) -> Vec<usize> {
    let mut taken = vec![false; members.len()];
    let mut out = Vec::with_capacity(members.len());
    for _ in 0..members.len() {
        let avail = |local: usize| !taken[local];
        let Some((local, _)) = tree.nearest(curr, &avail) else { break };
        taken[local] = true;
        let global = members[local];
        used[global] = true;
        curr = starts[global];
        out.push(global);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;
    use crate::cut::CutNode;

    fn cand(id: u64, x: f64, y: f64) -> Candidate {
        let mut cut = CutNode::Line(LineCut::new(Point::new(x, y), Point::new(x + 1.0, y)));
        cut.common_mut().id = id;
        Candidate { id, cut }
    }

    #[test]
    fn grid_size_clamps_to_bounds() {
        assert_eq!(grid_size(1), 3);
        assert_eq!(grid_size(1_000_000), 20);
    }

    #[test]
    fn every_candidate_is_ordered_exactly_once() {
        let batch: Vec<Candidate> = (0..150).map(|i| cand(i as u64, (i % 20) as f64 * 3.0, (i / 20) as f64 * 3.0)).collect();
        let order = spatial_order(&batch, Point::ORIGIN);
        assert_eq!(order.len(), batch.len());
        let mut seen: Vec<usize> = order.iter().map(|&(i, _)| i).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), batch.len());
    }
}
