//! `CutGroup`: an ordered collection of cuts or subgroups maintaining the
//! relationship within a closed path object. Grounded on
//! `meerk40t/core/cutcode/cutgroup.py`.
//!
//! `contains`/`inside` are populated once per `inner_first_ident` call
//! (spec §4.3) as indices into *this group's own* `children`, not a
//! global arena: the contained/container relation only ever relates
//! siblings within one `CutGroup`'s child list, so a plain `usize` index
//! plays the role of the original's weak object reference (spec §9).

use super::{CutCommon, CutNode};
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct CutGroup {
    pub common: CutCommon,
    pub children: Vec<CutNode>,
    pub constrained: bool,
    pub burn_started: bool,
    pub origin: Option<Point>,
    pub skip: bool,
    /// Indices (into `children`) of inner groups this group contains.
    pub contains: Option<Vec<usize>>,
    /// Indices (into `children`) of outer groups this group sits inside.
    pub inside: Option<Vec<usize>>,
}

impl CutGroup {
    pub fn new(children: Vec<CutNode>) -> Self {
        Self {
            common: CutCommon::new(),
            children,
            constrained: false,
            burn_started: false,
            origin: None,
            skip: false,
            contains: None,
            inside: None,
        }
    }

    pub fn closed(&self) -> bool {
        self.common.closed
    }

    pub fn set_closed(&mut self, closed: bool) -> &mut Self {
        self.common.closed = closed;
        self
    }

    /// Depth-first flattened leaves (spec §4.1 `flat()`).
    pub fn iter_flat(&self) -> impl Iterator<Item = &CutNode> + '_ {
        FlatIter {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn iter_flat_mut(&mut self) -> impl Iterator<Item = &mut CutNode> + '_ {
        FlatIterMut {
            stack: self.children.iter_mut().rev().collect(),
        }
    }

    /// `start`/`end` honor `normal`: a reversed group reads from its last
    /// child's end (as start) and first child's start (as end).
    pub fn start(&self) -> Option<Point> {
        if self.children.is_empty() {
            return None;
        }
        if self.common.normal {
            self.children.first()?.start()
        } else {
            self.children.last()?.end()
        }
    }

    pub fn end(&self) -> Option<Point> {
        if self.children.is_empty() {
            return None;
        }
        if self.common.normal {
            self.children.last()?.end()
        } else {
            self.children.first()?.start()
        }
    }

    pub fn is_burned(&self) -> bool {
        self.iter_flat().all(|c| c.is_burned())
    }

    /// Recompute `burns_done` as the min across direct children, and flag
    /// `burn_started` once any child has started (spec §3 invariant 1;
    /// the "parent tracks min of children" side effect of the original's
    /// `burns_done` setter).
    pub fn recompute_burns_done(&mut self) {
        let min = self.children.iter().map(|c| c.common().burns_done).min().unwrap_or(0);
        self.common.burns_done = min;
        if self.children.iter().any(|c| c.common().burns_done > 0) {
            self.burn_started = true;
        }
    }

    pub fn contains_unburned_groups(&self) -> bool {
        match &self.contains {
            None => false,
            Some(idxs) => idxs.iter().any(|&i| !self.children[i].is_burned()),
        }
    }

    /// Candidate generator (spec §4.5). `complete_path` restricts open,
    /// non-cut/engrave subgroups to their first/last segment only;
    /// `grouped_inner` switches to piece-based ordering.
    pub fn candidate(&self, complete_path: bool, grouped_inner: bool) -> Vec<&CutNode> {
        if grouped_inner {
            self.candidate_grouped(complete_path)
        } else {
            self.candidate_hierarchical(complete_path)
        }
    }

    fn emit_group<'a>(&'a self, grp: &'a CutNode, complete_path: bool, out: &mut Vec<&'a CutNode>) {
        let (is_open_non_cut, flat): (bool, Vec<&CutNode>) = match grp {
            CutNode::Group(g) => {
                let non_cut_engrave = !matches!(
                    g.common.original_op.as_deref(),
                    Some("op cut") | Some("op engrave")
                );
                (!g.closed() && non_cut_engrave, g.iter_flat().collect())
            }
            other => (false, vec![other]),
        };
        if complete_path && is_open_non_cut && !flat.is_empty() {
            if flat[0].common().is_candidate() {
                out.push(flat[0]);
            }
            if flat.len() > 1 {
                let last = flat[flat.len() - 1];
                if last.common().is_candidate() {
                    out.push(last);
                }
            }
        } else {
            for seg in flat {
                if seg.common().is_candidate() {
                    out.push(seg);
                }
            }
        }
    }

    /// Non-grouped: yield only the current dependency frontier — children
    /// whose contained inners are *already burned* — leaving deeper levels
    /// for a later call once this frontier is actually burned (spec §4.5:
    /// inner-first must bound what the travel optimizer is even allowed to
    /// nearest-neighbor-rank together, not just the order this method
    /// would emit them in within a single snapshot). Readiness is read off
    /// live `is_burned()` state rather than a call-local "processed" flag,
    /// so repeated calls naturally advance level by level as the caller
    /// burns each frontier before asking again (see
    /// `optimize::candidate::snapshot_candidates` / `optimize_travel`'s
    /// per-round re-snapshot loop). If nothing is ready but unburned
    /// children remain (e.g. a cyclic `contains` reference), flush
    /// everything anyway — the forward-progress guarantee that nothing is
    /// ever permanently suppressed.
    fn candidate_hierarchical(&self, complete_path: bool) -> Vec<&CutNode> {
        let mut out = Vec::new();
        let ready: Vec<usize> = (0..self.children.len())
            .filter(|&i| !self.children[i].is_burned())
            .filter(|&i| match &self.children[i] {
                CutNode::Group(g) => match &g.contains {
                    None => true,
                    Some(idxs) => idxs.iter().all(|&j| self.children[j].is_burned()),
                },
                _ => true,
            })
            .collect();

        if ready.is_empty() {
            for i in 0..self.children.len() {
                if !self.children[i].is_burned() {
                    self.emit_group(&self.children[i], complete_path, &mut out);
                }
            }
            return out;
        }

        for &i in &ready {
            self.emit_group(&self.children[i], complete_path, &mut out);
        }
        out
    }

    /// Grouped-inner (piece) ordering (spec §4.5).
    fn candidate_grouped(&self, complete_path: bool) -> Vec<&CutNode> {
        let n = self.children.len();
        let mut processed = vec![false; n];
        let mut pieces: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            if processed[i] {
                continue;
            }
            let is_outer = matches!(&self.children[i], CutNode::Group(g) if g.contains.is_some());
            if !is_outer {
                continue;
            }
            let mut piece = vec![i];
            processed[i] = true;
            if let CutNode::Group(g) = &self.children[i] {
                if let Some(idxs) = &g.contains {
                    for &j in idxs {
                        if !processed[j] {
                            piece.push(j);
                            processed[j] = true;
                        }
                    }
                }
            }
            pieces.push(piece);
        }
        for i in 0..n {
            if !processed[i] {
                pieces.push(vec![i]);
                processed[i] = true;
            }
        }

        let mut out = Vec::new();
        for piece in &pieces {
            let classify = |idx: usize| -> u8 {
                match &self.children[idx] {
                    CutNode::Group(g) => match (g.inside.is_some(), g.contains.is_some()) {
                        (true, false) => 0,  // pure inner
                        (true, true) => 1,   // both
                        (false, false) => 2, // standalone
                        (false, true) => 3,  // outer
                    },
                    _ => 2,
                }
            };
            let mut ordered: Vec<usize> = piece.clone();
            ordered.sort_by_key(|&i| classify(i));
            for i in ordered {
                if self.children[i].is_burned() {
                    continue;
                }
                self.emit_group(&self.children[i], complete_path, &mut out);
            }
        }
        out
    }
}

struct FlatIter<'a> {
    stack: Vec<&'a CutNode>,
}

impl<'a> Iterator for FlatIter<'a> {
    type Item = &'a CutNode;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                CutNode::Group(g) => {
                    self.stack.extend(g.children.iter().rev());
                }
                other => return Some(other),
            }
        }
        None
    }
}

struct FlatIterMut<'a> {
    stack: Vec<&'a mut CutNode>,
}

impl<'a> Iterator for FlatIterMut<'a> {
    type Item = &'a mut CutNode;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                CutNode::Group(g) => {
                    self.stack.extend(g.children.iter_mut().rev());
                }
                other => return Some(other),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> CutNode {
        CutNode::Line(LineCut::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn flat_depth_first_through_nested_groups() {
        let inner = CutGroup::new(vec![line(0.0, 0.0, 1.0, 1.0)]);
        let outer = CutGroup::new(vec![CutNode::Group(inner), line(2.0, 2.0, 3.0, 3.0)]);
        let flat: Vec<_> = outer.iter_flat().collect();
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn candidate_never_suppresses_when_stalled() {
        // Two groups that (incorrectly) reference each other as inner —
        // cannot happen via real containment, but exercises the stall path.
        let a = CutGroup::new(vec![line(0.0, 0.0, 1.0, 0.0)]);
        let b = CutGroup::new(vec![line(1.0, 1.0, 2.0, 1.0)]);
        let mut group = CutGroup::new(vec![CutNode::Group(a), CutNode::Group(b)]);
        if let CutNode::Group(ga) = &mut group.children[0] {
            ga.contains = Some(vec![1]);
        }
        if let CutNode::Group(gb) = &mut group.children[1] {
            gb.contains = Some(vec![0]);
        }
        let candidates = group.candidate(false, false);
        assert_eq!(candidates.len(), 2, "stalled groups must still be flushed");
    }

    #[test]
    fn candidate_exhaustion_yields_every_unburned_scalar() {
        let group = CutGroup::new(vec![
            line(0.0, 0.0, 1.0, 0.0),
            line(1.0, 0.0, 2.0, 0.0),
            line(2.0, 0.0, 3.0, 0.0),
        ]);
        assert_eq!(group.candidate(false, false).len(), 3);
    }
}
