//! Nearest-neighbor travel optimizer (spec §4.6). Grounded on
//! `meerk40t/core/cutplan.py::inner_first_ident`/`short_travel_cutcode`: the
//! original's greedy "pick closest candidate, walk to it, repeat" loop,
//! re-expressed around [`CutGroup::candidate`] snapshots and the `id`-based
//! burn-marking scheme in [`crate::optimize::candidate`] rather than mutating
//! cuts through a shared Python list while a generator is still open.

use crate::cut::{CutGroup, CutNode};
use crate::float_types::{Real, CONTINUATION_GAP};
use crate::geom::Point;
use crate::optimize::candidate::{burn_by_id, end_point, snapshot_candidates, start_point, Candidate};
use crate::optimize::kdtree::KdTree;
use crate::optimize::spatial::spatial_order;

/// Above this many live scalar cuts, delegate ordering within a batch to
/// the spatial grid + per-cell k-d tree path instead of full O(B^2)
/// linear nearest-neighbor search (spec §4.6's size-tiered table).
const SPATIAL_THRESHOLD: usize = 100;
/// Above this, the original falls back to "legacy" NN with no caching —
/// algorithmically the same greedy method, just re-scanning the whole
/// remaining batch every step (spec §4.6 note: legacy NN is not a
/// different algorithm, only a different cache strategy). We reuse the
/// same linear-scan core for every tier up to `SPATIAL_THRESHOLD` and
/// above `LEGACY_THRESHOLD`; only the middle band gets the grid.
const LEGACY_THRESHOLD: usize = 500;

/// Run the travel optimizer over `group`'s scalar cuts, returning the
/// emitted sequence in burn order. Mutates `group` in place, marking each
/// emitted cut's `burns_done`.
pub fn optimize_travel(
    group: &mut CutGroup,
    complete_path: bool,
    grouped_inner: bool,
    start: Option<Point>,
) -> Vec<CutNode> {
    let mut curr = start.unwrap_or(Point::ORIGIN);
    let mut out = Vec::new();
    let mut prev_id: Option<u64> = None;

    loop {
        let batch = snapshot_candidates(group, complete_path, grouped_inner);
        if batch.is_empty() {
            break;
        }
        let n = batch.len();
        let order = if n > SPATIAL_THRESHOLD && n <= LEGACY_THRESHOLD {
            log::trace!("optimize_travel: spatial pass over {} candidates", n);
            spatial_order(&batch, curr)
        } else {
            log::trace!("optimize_travel: linear pass over {} candidates", n);
            linear_order(&batch, curr, prev_id)
        };

        for (idx, reversed) in order {
            let cand = &batch[idx];
            let emitted = match burn_by_id(group, cand.id, reversed) {
                Some(e) => e,
                None => continue,
            };
            if let Some(end) = emitted.end() {
                curr = end;
            }
            prev_id = Some(cand.id);
            out.push(emitted);
        }
    }
    log::debug!("optimize_travel: emitted {} cuts", out.len());
    out
}

/// Greedy NN ordering of an entire batch via repeated linear scans — the
/// shared core used by the simple (<100), legacy (>500), and as a
/// fallback within the spatial tier's own per-cell search.
pub fn linear_order(batch: &[Candidate], start: Point, mut prev_id: Option<u64>) -> Vec<(usize, bool)> {
    let mut used = vec![false; batch.len()];
    let mut order = Vec::with_capacity(batch.len());
    let mut curr = start;

    for _ in 0..batch.len() {
        // Continuation preference: if the node we just burned has a
        // sibling-adjacent candidate starting essentially where we stand,
        // prefer it over a fresh nearest-neighbor search (spec §4.6 2a).
        if let Some(pid) = prev_id {
            if let Some(i) = continuation_candidate(batch, &used, pid, curr) {
                used[i] = true;
                order.push((i, false));
                if let Some(e) = end_point(&batch[i].cut, false) {
                    curr = e;
                }
                prev_id = Some(batch[i].id);
                continue;
            }
        }

        let pick = nearest_unused(batch, &used, curr);
        let Some((i, reversed)) = pick else { break };
        used[i] = true;
        order.push((i, reversed));
        if let Some(e) = end_point(&batch[i].cut, reversed) {
            curr = e;
        }
        prev_id = Some(batch[i].id);
    }
    order
}

fn continuation_candidate(batch: &[Candidate], used: &[bool], _prev_id: u64, curr: Point) -> Option<usize> {
    batch.iter().enumerate().find_map(|(i, c)| {
        if used[i] || !c.cut.reversible() {
            return None;
        }
        match start_point(&c.cut, false) {
            Some(s) if s.distance(&curr) <= CONTINUATION_GAP => Some(i),
            _ => None,
        }
    })
}

/// Find the nearest unused candidate to `curr`, considering both
/// orientations when reversible; ties prefer forward orientation, then
/// the earlier index (stable, deterministic ordering — spec §8 invariant
/// on tie-break determinism). Uses a Chebyshev-distance early-reject
/// bound before computing the exact Euclidean distance.
fn nearest_unused(batch: &[Candidate], used: &[bool], curr: Point) -> Option<(usize, bool)> {
    let mut best: Option<(usize, bool, Real)> = None;
    for (i, c) in batch.iter().enumerate() {
        if used[i] {
            continue;
        }
        for &reversed in &[false, true] {
            if reversed && !c.cut.reversible() {
                continue;
            }
            let Some(p) = start_point(&c.cut, reversed) else { continue };
            let cheby = (p.x - curr.x).abs().max((p.y - curr.y).abs());
            if let Some((_, _, bd)) = best {
                if cheby >= bd {
                    continue;
                }
            }
            let d = p.distance(&curr);
            if best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((i, reversed, d));
            }
            if !c.cut.reversible() {
                break;
            }
        }
    }
    best.map(|(i, r, _)| (i, r))
}

/// Locate the nearest point among `points` to `query` using a freshly
/// built k-d tree; used when a per-cell batch in the spatial tier is
/// large enough to be worth indexing (spec §4.6 spatial tier, step 3).
pub fn kdtree_nearest(points: &[Point], query: Point, available: &dyn Fn(usize) -> bool) -> Option<(usize, Real)> {
    KdTree::build(points.to_vec()).nearest(query, available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> CutNode {
        CutNode::Line(LineCut::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn visits_closest_cut_first() {
        let mut group = CutGroup::new(vec![
            line(100.0, 0.0, 110.0, 0.0),
            line(1.0, 0.0, 2.0, 0.0),
        ]);
        let out = optimize_travel(&mut group, false, false, Some(Point::ORIGIN));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn every_cut_gets_burned_exactly_once() {
        let mut group = CutGroup::new(vec![
            line(0.0, 0.0, 1.0, 0.0),
            line(5.0, 5.0, 6.0, 5.0),
            line(20.0, 20.0, 21.0, 20.0),
        ]);
        let out = optimize_travel(&mut group, false, false, None);
        assert_eq!(out.len(), 3);
        assert!(group.is_burned());
    }

    #[test]
    fn reversible_cut_may_be_emitted_reversed_for_shorter_travel() {
        // Starting near the far end of a line should burn it reversed.
        let mut group = CutGroup::new(vec![line(0.0, 0.0, 100.0, 0.0)]);
        let out = optimize_travel(&mut group, false, false, Some(Point::new(100.0, 0.0)));
        assert_eq!(out[0].start(), Some(Point::new(100.0, 0.0)));
    }
}
