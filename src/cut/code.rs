//! `CutCode`: the top-level `CutGroup` a plan stage operates on. Grounded
//! on `meerk40t/core/cutcode/cutcode.py`.

use super::group::CutGroup;
use super::CutNode;
use crate::float_types::Real;
use crate::geom::Point;

#[derive(Debug, Clone)]
pub struct CutCode {
    pub group: CutGroup,
    pub output: bool,
    pub start_override: Option<Point>,
}

impl CutCode {
    pub fn new(children: Vec<CutNode>) -> Self {
        Self {
            group: CutGroup::new(children),
            output: true,
            start_override: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn children(&self) -> &[CutNode] {
        &self.group.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<CutNode> {
        &mut self.group.children
    }

    pub fn iter_flat(&self) -> impl Iterator<Item = &CutNode> + '_ {
        self.group.iter_flat()
    }

    pub fn len_flat(&self) -> usize {
        self.iter_flat().count()
    }

    pub fn is_empty(&self) -> bool {
        self.group.children.is_empty()
    }

    pub fn start(&self) -> Point {
        self.start_override
            .or_else(|| self.group.start())
            .unwrap_or(Point::ORIGIN)
    }

    /// Total travel distance between consecutive flattened cuts, plus the
    /// jump from `start` to the first cut if `include_start`.
    pub fn length_travel(&self, include_start: bool) -> Real {
        let flat: Vec<&CutNode> = self.iter_flat().collect();
        if flat.is_empty() {
            return 0.0;
        }
        let mut distance = 0.0;
        if include_start {
            if let Some(first_start) = flat[0].start() {
                distance += self.start().distance(&first_start);
            }
        }
        for pair in flat.windows(2) {
            if let (Some(end), Some(start)) = (pair[0].end(), pair[1].start()) {
                distance += end.distance(&start);
            }
        }
        distance
    }

    pub fn length_cut(&self) -> Real {
        self.iter_flat().map(|c| c.length()).sum()
    }

    /// Reorder this `CutCode`'s top-level children per an explicit
    /// permutation; negative (bitwise-NOT-encoded) indices request a
    /// reverse of that element first. Grounded on
    /// `cutcode.py::reordered`.
    pub fn reordered(&mut self, order: &[isize]) {
        let mut reordered = Vec::with_capacity(order.len());
        for &raw in order {
            let idx = if raw < 0 { !raw as usize } else { raw as usize };
            if idx >= self.group.children.len() {
                continue;
            }
            if raw < 0 && self.group.children[idx].reversible() {
                self.group.children[idx].reverse();
            }
            reordered.push(self.group.children[idx].clone());
        }
        self.group.children = reordered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;

    #[test]
    fn empty_cutcode_has_no_travel() {
        let code = CutCode::empty();
        assert_eq!(code.length_travel(true), 0.0);
        assert_eq!(code.length_cut(), 0.0);
    }

    #[test]
    fn travel_sums_gaps_between_cuts() {
        let code = CutCode::new(vec![
            CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0))),
            CutNode::Line(LineCut::new(Point::new(2.0, 0.0), Point::new(3.0, 0.0))),
        ]);
        assert!((code.length_travel(false) - 1.0).abs() < 1e-9);
    }
}
