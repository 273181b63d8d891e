//! Level-based scheduler for deeply nested inner-first geometry (spec
//! §4.8). Grounded on `meerk40t/core/cutplan.py::inner_first_ident`'s
//! containment DAG, walked here by nesting depth rather than the
//! piece-based grouping in [`crate::cut::CutGroup::candidate`]: every
//! sibling at depth `d` is scheduled before any sibling at depth `d - 1`,
//! and siblings within the same depth are never interleaved with another
//! depth's siblings.

use crate::cut::CutNode;
use hashbrown::HashMap;

/// Per-sibling nesting levels derived from the `inside` relation built by
/// `inner_first_ident`: a group with no outer container is level 0; a
/// group inside another is `1 + max(level of what it's inside)`.
pub struct HierarchyContext {
    /// `levels[i]` is the nesting depth of `children[i]`.
    levels: Vec<u32>,
    max_level: u32,
}

impl HierarchyContext {
    pub fn build(children: &[CutNode]) -> Self {
        let n = children.len();
        let mut levels = vec![0u32; n];
        let mut memo: HashMap<usize, u32> = HashMap::new();
        for i in 0..n {
            levels[i] = Self::level_of(children, i, &mut memo, &mut Vec::new());
        }
        let max_level = levels.iter().copied().max().unwrap_or(0);
        Self { levels, max_level }
    }

    fn level_of(children: &[CutNode], i: usize, memo: &mut HashMap<usize, u32>, visiting: &mut Vec<usize>) -> u32 {
        if let Some(&v) = memo.get(&i) {
            return v;
        }
        // Defensive cycle guard; the containment DAG should never cycle,
        // but a broken `inside` chain must not recurse forever.
        if visiting.contains(&i) {
            return 0;
        }
        visiting.push(i);
        let level = match &children[i] {
            CutNode::Group(g) => match &g.inside {
                None => 0,
                Some(idxs) if idxs.is_empty() => 0,
                Some(idxs) => 1 + idxs
                    .iter()
                    .map(|&j| Self::level_of(children, j, memo, visiting))
                    .max()
                    .unwrap_or(0),
            },
            _ => 0,
        };
        visiting.pop();
        memo.insert(i, level);
        level
    }

    /// Processing order: one `Vec<usize>` of sibling indices per level,
    /// deepest level first. Consumers must fully drain one level's batch
    /// before starting the next — cross-level interleaving would burn an
    /// outer shape before an inner one it's meant to protect.
    pub fn get_processing_order(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut level = self.max_level;
        loop {
            let at_level: Vec<usize> = self
                .levels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == level)
                .map(|(i, _)| i)
                .collect();
            if !at_level.is_empty() {
                out.push(at_level);
            }
            if level == 0 {
                break;
            }
            level -= 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{CutGroup, LineCut};
    use crate::geom::Point;

    fn leaf_group(inside: Option<Vec<usize>>) -> CutNode {
        let mut g = CutGroup::new(vec![CutNode::Line(LineCut::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ))]);
        g.inside = inside;
        CutNode::Group(g)
    }

    #[test]
    fn three_level_nesting_orders_deepest_first() {
        let children = vec![
            leaf_group(None),        // level 0, outermost
            leaf_group(Some(vec![0])), // level 1, inside child 0
            leaf_group(Some(vec![1])), // level 2, inside child 1
        ];
        let ctx = HierarchyContext::build(&children);
        let order = ctx.get_processing_order();
        assert_eq!(order, vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn siblings_at_same_level_share_one_batch() {
        let children = vec![leaf_group(None), leaf_group(None)];
        let ctx = HierarchyContext::build(&children);
        let order = ctx.get_processing_order();
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].len(), 2);
    }
}
