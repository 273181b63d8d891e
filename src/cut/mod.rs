//! Cut primitive algebra (spec §3, §4.1). A sum type `CutNode` stands in
//! for the original duck-typed `CutObject` hierarchy (spec §9): every
//! variant carries the same [`CutCommon`] fields and dispatches `start`/
//! `end`/`length`/`generator`/`point`/`reverse` statically instead of
//! through virtual calls.
//!
//! Parent links are not stored on children (that would need `Rc<RefCell<_>>`
//! or an arena); instead a `CutGroup` recomputes its own `burns_done` as the
//! min across its direct children whenever a child changes, which is the
//! same "parent tracks min of children" behavior the original's
//! `burns_done` property setter walked up one level at a time.

pub mod code;
pub mod group;
pub mod scalar;

pub use code::CutCode;
pub use group::CutGroup;
pub use scalar::cubic_cut::CubicCut;
pub use scalar::dwell_cut::DwellCut;
pub use scalar::line_cut::LineCut;
pub use scalar::quad_cut::QuadCut;
pub use scalar::raster_cut::RasterCut;
pub use scalar::raw_cut::RawCut;

use crate::float_types::Real;
use crate::geom::Point;
use crate::settings::Settings;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CUT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique id assigned to every cut primitive at construction.
/// Stands in for object identity (the original relied on Python object
/// identity to re-find a cut after cloning a candidate snapshot); used by
/// the travel optimizer to locate a cut in the owning tree after
/// selecting it from a `candidate()` snapshot.
pub fn next_cut_id() -> u64 {
    NEXT_CUT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Fields every cut primitive and group carries (spec §3's "Cut primitive"
/// paragraph).
#[derive(Debug, Clone)]
pub struct CutCommon {
    pub id: u64,
    pub settings: Option<Settings>,
    pub passes: u32,
    pub burns_done: u32,
    pub normal: bool,
    pub first: bool,
    pub last: bool,
    pub closed: bool,
    pub original_op: Option<String>,
    pub pass_index: i32,
    pub highlighted: bool,
}

impl Default for CutCommon {
    fn default() -> Self {
        Self {
            id: 0,
            settings: None,
            passes: 1,
            burns_done: 0,
            normal: true,
            first: false,
            last: false,
            closed: false,
            original_op: None,
            pass_index: -1,
            highlighted: false,
        }
    }
}

impl CutCommon {
    /// Construct with a fresh, process-unique id.
    pub fn new() -> Self {
        Self {
            id: next_cut_id(),
            ..Default::default()
        }
    }

    pub fn is_burned(&self) -> bool {
        self.burns_done >= self.passes
    }

    pub fn is_candidate(&self) -> bool {
        self.burns_done < self.passes
    }
}

/// The sum type replacing the original's duck-typed `CutObject` tree.
/// `Group` recurses; every other variant is a scalar (leaf) cut.
#[derive(Debug, Clone)]
pub enum CutNode {
    Line(LineCut),
    Quad(QuadCut),
    Cubic(CubicCut),
    Raw(RawCut),
    Dwell(DwellCut),
    Raster(RasterCut),
    Group(CutGroup),
}

impl CutNode {
    pub fn common(&self) -> &CutCommon {
        match self {
            CutNode::Line(c) => &c.common,
            CutNode::Quad(c) => &c.common,
            CutNode::Cubic(c) => &c.common,
            CutNode::Raw(c) => &c.common,
            CutNode::Dwell(c) => &c.common,
            CutNode::Raster(c) => &c.common,
            CutNode::Group(g) => &g.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CutCommon {
        match self {
            CutNode::Line(c) => &mut c.common,
            CutNode::Quad(c) => &mut c.common,
            CutNode::Cubic(c) => &mut c.common,
            CutNode::Raw(c) => &mut c.common,
            CutNode::Dwell(c) => &mut c.common,
            CutNode::Raster(c) => &mut c.common,
            CutNode::Group(g) => &mut g.common,
        }
    }

    /// Start point, respecting `normal` (spec §3 invariant 5, §4.1).
    pub fn start(&self) -> Option<Point> {
        match self {
            CutNode::Line(c) => Some(c.start()),
            CutNode::Quad(c) => Some(c.start()),
            CutNode::Cubic(c) => Some(c.start()),
            CutNode::Raw(c) => c.start(),
            CutNode::Dwell(c) => Some(c.start()),
            CutNode::Raster(c) => Some(c.start()),
            CutNode::Group(g) => g.start(),
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self {
            CutNode::Line(c) => Some(c.end()),
            CutNode::Quad(c) => Some(c.end()),
            CutNode::Cubic(c) => Some(c.end()),
            CutNode::Raw(c) => c.end(),
            CutNode::Dwell(c) => Some(c.end()),
            CutNode::Raster(c) => Some(c.end()),
            CutNode::Group(g) => g.end(),
        }
    }

    pub fn length(&self) -> Real {
        match self {
            CutNode::Line(c) => c.length(),
            CutNode::Quad(c) => c.length(),
            CutNode::Cubic(c) => c.length(),
            CutNode::Raw(c) => c.length(),
            CutNode::Dwell(c) => c.length(),
            CutNode::Raster(c) => c.length(),
            CutNode::Group(g) => g.iter_flat().map(|c| c.length()).sum(),
        }
    }

    /// `(x, y, laser_on)` triples via the plotter for this shape (spec §4.1).
    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        match self {
            CutNode::Line(c) => c.generator(),
            CutNode::Quad(c) => c.generator(),
            CutNode::Cubic(c) => c.generator(),
            CutNode::Raw(c) => c.generator(),
            CutNode::Dwell(c) => c.generator(),
            CutNode::Raster(c) => c.generator(),
            CutNode::Group(_) => Vec::new(),
        }
    }

    /// Sample the primitive at `t in [0, 1]`; used by the containment
    /// analyzer to build the 101/1001-point polygon approximations.
    pub fn point(&self, t: Real) -> Option<Point> {
        match self {
            CutNode::Line(c) => Some(c.point(t)),
            CutNode::Quad(c) => Some(c.point(t)),
            CutNode::Cubic(c) => Some(c.point(t)),
            CutNode::Raw(_) => None,
            CutNode::Dwell(c) => Some(c.point(t)),
            CutNode::Raster(_) => None,
            CutNode::Group(_) => None,
        }
    }

    pub fn reversible(&self) -> bool {
        !matches!(self, CutNode::Dwell(_) | CutNode::Group(_))
    }

    pub fn reverse(&mut self) {
        match self {
            CutNode::Line(c) => c.common.normal = !c.common.normal,
            CutNode::Quad(c) => c.common.normal = !c.common.normal,
            CutNode::Cubic(c) => c.common.normal = !c.common.normal,
            CutNode::Raw(c) => c.reverse(),
            CutNode::Dwell(_) => {}
            CutNode::Raster(c) => c.common.normal = !c.common.normal,
            CutNode::Group(_) => {}
        }
    }

    /// Per-variant padding/kerf hint; defaulted to 0 and unused by any
    /// planner stage (spec §3 [SUPPLEMENT]).
    pub fn extra(&self) -> Real {
        0.0
    }

    pub fn is_burned(&self) -> bool {
        self.common().is_burned()
    }

    pub fn id(&self) -> u64 {
        self.common().id
    }

    pub fn major_axis_is_x(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(s), Some(e)) => (s.x - e.x).abs() > (s.y - e.y).abs(),
            _ => true,
        }
    }

    /// Depth-first leaves: scalar cuts yield themselves, groups recurse.
    pub fn flat(&self) -> Vec<&CutNode> {
        match self {
            CutNode::Group(g) => g.iter_flat().collect(),
            other => vec![other],
        }
    }

    pub fn flat_mut(&mut self) -> Vec<&mut CutNode> {
        match self {
            CutNode::Group(g) => g.iter_flat_mut().collect(),
            other => vec![other],
        }
    }

    pub fn set_burns_done(&mut self, burns: u32) {
        self.common_mut().burns_done = burns;
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.common().settings.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_idempotence_line() {
        let mut cut = CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let before_start = cut.start();
        cut.reverse();
        cut.reverse();
        assert_eq!(cut.start(), before_start);
    }

    #[test]
    fn reverse_flips_start_end() {
        let mut cut = CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0)));
        let (s0, e0) = (cut.start(), cut.end());
        cut.reverse();
        assert_eq!(cut.start(), e0);
        assert_eq!(cut.end(), s0);
    }

    #[test]
    fn dwell_is_never_reversible() {
        let cut = CutNode::Dwell(DwellCut::new(Point::new(1.0, 1.0), 250));
        assert!(!cut.reversible());
    }
}
