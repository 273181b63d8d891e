//! Thin wrapper around [`CutGroup::candidate`] used by the travel
//! optimizer: snapshots the currently-eligible scalar cuts (respecting
//! inner-first/piece constraints) as owned, id-tagged clones so the
//! caller can rank them without holding a borrow into the live tree.

use crate::cut::{CutGroup, CutNode};
use crate::geom::Point;

/// One eligible candidate: its owned snapshot plus the id used to locate
/// and mutate the corresponding node in the live tree afterward.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: u64,
    pub cut: CutNode,
}

pub fn snapshot_candidates(group: &CutGroup, complete_path: bool, grouped_inner: bool) -> Vec<Candidate> {
    group
        .candidate(complete_path, grouped_inner)
        .into_iter()
        .map(|c| Candidate { id: c.id(), cut: c.clone() })
        .collect()
}

/// Mark the node with `id` as burned for one pass in the live tree, and
/// return a copy (optionally reversed) suitable for appending to the
/// optimized output.
pub fn burn_by_id(group: &mut CutGroup, id: u64, reversed: bool) -> Option<CutNode> {
    for node in group.iter_flat_mut() {
        if node.id() == id {
            let passes = node.common().passes;
            node.set_burns_done(node.common().burns_done + 1);
            let mut emitted = node.clone();
            if reversed && emitted.reversible() {
                emitted.reverse();
            }
            let _ = passes;
            return Some(emitted);
        }
    }
    None
}

pub fn end_point(candidate: &CutNode, reversed: bool) -> Option<Point> {
    if reversed {
        candidate.start()
    } else {
        candidate.end()
    }
}

pub fn start_point(candidate: &CutNode, reversed: bool) -> Option<Point> {
    if reversed {
        candidate.end()
    } else {
        candidate.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;

    #[test]
    fn snapshot_then_burn_by_id_round_trips() {
        let mut group = CutGroup::new(vec![CutNode::Line(LineCut::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
        ))]);
        let snap = snapshot_candidates(&group, false, false);
        assert_eq!(snap.len(), 1);
        let burned = burn_by_id(&mut group, snap[0].id, false).unwrap();
        assert_eq!(burned.start(), Some(Point::new(0.0, 0.0)));
        assert!(group.children[0].is_burned());
    }
}
