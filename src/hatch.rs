//! Hatch/skip group extraction (spec §4.6). Groups marked `skip = true`
//! represent hatch fills produced by effect combination; when
//! `hatch_optimize` is on they are pulled out and optimized separately
//! from the rest of the candidate set.
//!
//! **Critical safety rule**: if every item is skip-marked, extraction is
//! a no-op — otherwise the candidate set would go empty and the
//! optimizer would silently drop the entire job (spec §8 invariant 8).

use crate::cut::CutNode;

/// Partition `children` into (non-skip, skip) groups. If every item is
/// skip-marked, returns the original list as "non-skip" unchanged so
/// nothing is ever lost.
pub fn extract_skip_groups(children: Vec<CutNode>) -> (Vec<CutNode>, Vec<CutNode>) {
    let all_skip = !children.is_empty()
        && children.iter().all(|c| matches!(c, CutNode::Group(g) if g.skip));
    if all_skip {
        return (children, Vec::new());
    }
    children
        .into_iter()
        .partition(|c| !matches!(c, CutNode::Group(g) if g.skip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{CutGroup, LineCut};
    use crate::geom::Point;

    fn skip_group() -> CutNode {
        let mut g = CutGroup::new(vec![CutNode::Line(LineCut::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ))]);
        g.skip = true;
        CutNode::Group(g)
    }

    fn normal_group() -> CutNode {
        CutNode::Group(CutGroup::new(vec![CutNode::Line(LineCut::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ))]))
    }

    #[test]
    fn all_skip_items_are_never_removed() {
        let children = vec![skip_group(), skip_group()];
        let (non_skip, skip) = extract_skip_groups(children);
        assert_eq!(non_skip.len(), 2);
        assert!(skip.is_empty());
    }

    #[test]
    fn mixed_groups_are_partitioned() {
        let children = vec![normal_group(), skip_group(), normal_group()];
        let (non_skip, skip) = extract_skip_groups(children);
        assert_eq!(non_skip.len(), 2);
        assert_eq!(skip.len(), 1);
    }
}
