//! `CutPlan`: the pipeline orchestrator (spec §4.4). Grounded almost
//! line-for-line on `meerk40t/core/cutplan.py` for stage order and the
//! `commands`/`spool_commands` thunk-queue shape — re-expressed here as an
//! enum of named commands rather than boxed closures, since every command
//! this planner enqueues is one of a small fixed set and the end-to-end
//! test suite inspects the queue by name (spec §8 scenario 6).

pub mod blob;
pub mod copy;
pub mod execute;
pub mod geometry;
pub mod merge;
pub mod preopt;
pub mod preprocess;

pub use geometry::{GeomSegment, GeomStream};

use crate::config::PlanConfig;
use crate::cut::CutCode;
use crate::geom::Point;

/// One item in the flattened plan: either burnable cutcode or a
/// console-style side-effecting op (coolant, air assist, ...).
#[derive(Debug, Clone)]
pub enum PlanItem {
    Cut(CutCode),
    Console(String),
}

/// A named optimizer thunk, enqueued by `preopt` and drained by `execute`
/// (spec §4.4 steps 7-9). Plain data rather than a boxed closure: every
/// command this planner ever enqueues is one of these five, so a
/// `Vec<Command>` already gives `execute` everything it needs to dispatch,
/// and lets tests assert on queue *names* (spec §8 scenario 6) without
/// downcasting a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OptimizeTravel,
    OptimizeTravel2Opt,
    OptimizeCuts,
    BasicCutcodeSequencing,
    MergeCutcode,
}

/// Owns the mutable plan buffer and the two command queues the pipeline
/// stages read and append to (spec §4.4's opening paragraph).
pub struct CutPlan {
    pub name: String,
    pub config: PlanConfig,
    pub plan: Vec<PlanItem>,
    pub commands: Vec<Command>,
    pub spool_commands: Vec<Command>,
    previous_bounds: Option<(Point, Point)>,
    pub outline: Option<Vec<Point>>,
    /// Timestamped "optimize" diagnostic channel (spec §6); no structure
    /// required beyond human-readable strings, so a growable log is enough.
    pub diagnostics: Vec<String>,
    pub start: Option<Point>,
}

impl CutPlan {
    pub fn new(name: impl Into<String>, config: PlanConfig) -> Self {
        Self {
            name: name.into(),
            config,
            plan: Vec::new(),
            commands: Vec::new(),
            spool_commands: Vec::new(),
            previous_bounds: None,
            outline: None,
            diagnostics: Vec::new(),
            start: None,
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.previous_bounds
    }

    pub fn set_bounds(&mut self, bounds: (Point, Point)) {
        self.previous_bounds = Some(bounds);
    }

    /// Every `CutCode` item currently in the plan, in order.
    pub fn cutcodes(&self) -> impl Iterator<Item = &CutCode> {
        self.plan.iter().filter_map(|item| match item {
            PlanItem::Cut(c) => Some(c),
            PlanItem::Console(_) => None,
        })
    }

    pub fn cutcodes_mut(&mut self) -> impl Iterator<Item = &mut CutCode> {
        self.plan.iter_mut().filter_map(|item| match item {
            PlanItem::Cut(c) => Some(c),
            PlanItem::Console(_) => None,
        })
    }

    /// Clears the plan buffer between jobs (spec §3 lifecycle: "destroyed
    /// when the plan is cleared between jobs").
    pub fn clear(&mut self) {
        self.plan.clear();
        self.commands.clear();
        self.spool_commands.clear();
        self.previous_bounds = None;
        self.outline = None;
        self.diagnostics.clear();
        self.start = None;
    }
}
