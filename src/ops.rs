//! Consumed interfaces (spec §6): the planner treats the operation tree
//! as a host-provided graph of `OperationNode`/`ElementNode` trait
//! objects. `SimpleOperation` is a minimal in-crate implementation used
//! by tests and doctests, standing in for whatever node type a host
//! element/operation tree actually uses.

use crate::cut::CutNode;
use crate::errors::PlanResult;
use crate::float_types::Real;
use crate::geom::Matrix;
use crate::geom::Point;
use crate::settings::Settings;
use std::rc::Rc;

/// An operation node: `op cut`, `op engrave`, `op raster`, a `util`
/// console/wait/home op, or a placement. Spec §6.
pub trait OperationNode {
    fn op_type(&self) -> &str;
    fn loops(&self) -> u32 {
        1
    }
    fn passes(&self) -> u32 {
        1
    }
    fn output(&self) -> bool {
        true
    }
    /// `0` = none, `1` = air assist, `2` = coolant (spec §6).
    fn coolant(&self) -> u8 {
        0
    }
    fn settings(&self) -> Option<Settings> {
        None
    }
    fn children(&self) -> &[Rc<dyn ElementNode>];

    /// Optional preprocess hook invoked with the active device matrix.
    fn preprocess(&mut self, _matrix: &Matrix) -> PlanResult<()> {
        Ok(())
    }

    /// Convert this operation's geometry into cut primitives.
    fn as_cutobjects(&self, closed_distance: i32, passes: u32) -> Vec<CutNode>;

    fn is_util(&self) -> bool {
        self.op_type().starts_with("util")
    }

    /// Produce a new op of the same kind carrying only the children at
    /// `indices` from this op's own child list, sharing element
    /// references rather than deep-copying them — spec §4.7's "one
    /// shallow-copied op per cluster" raster-bucketing step. The default
    /// can't fabricate a same-concrete-type copy generically, so it
    /// returns `None`; a host overrides this to support raster
    /// clustering, and a `None` here just leaves the original op unsplit.
    fn cluster_copy(&self, _indices: &[usize]) -> Option<Box<dyn OperationNode>> {
        None
    }
}

/// An element node: artwork referenced by an operation. Spec §6. Nodes are
/// shared via `Rc` (cheap reference-sharing across `cluster_copy` splits),
/// so the mutating hooks below take `&self`; a host with real mutable state
/// backs them with interior mutability, matching the attribute checks
/// (`hasattr(node, "geometry")`, `hasattr(node, "mktext")`, ...) the
/// original gates each sub-step on.
pub trait ElementNode {
    fn bbox(&self) -> Option<(Point, Point)>;
    fn transform(&self) -> Matrix {
        Matrix::identity()
    }

    /// Simplify this element's resolution-dependent geometry in place at
    /// `tolerance` (spec §4.4 step 2, gated on `opt_reduce_details`).
    /// Default no-op: elements without simplifiable geometry just ignore it.
    fn simplify(&self, _tolerance: Real) {}

    /// The raw wordlist-referencing text template this element carries, if
    /// any (the original's `mktext` attribute). `None` for non-text
    /// elements.
    fn mktext(&self) -> Option<&str> {
        None
    }

    /// Receive the wordlist-substituted text for an element whose `mktext`
    /// returned `Some`. Default no-op.
    fn set_translated_text(&self, _text: String) {}

    /// Optional per-element preprocess hook invoked with the active device
    /// matrix (spec §4.4 step 2's "invoke node-level preprocess").
    fn preprocess(&self, _matrix: &Matrix) {}
}

/// Minimal host-agnostic operation used by tests/doctests. Assumes a
/// 1:1 correspondence between `children` (consulted for raster
/// clustering bounds) and `cuts` (consulted for geometry) when split via
/// `cluster_copy` — a real host's richer node type would track this
/// itself; this stand-in keeps the two lists aligned by index.
pub struct SimpleOperation {
    pub op_type: String,
    pub loops: u32,
    pub passes: u32,
    pub output: bool,
    pub coolant: u8,
    pub settings: Option<Settings>,
    pub cuts: Vec<CutNode>,
    pub children: Vec<Rc<dyn ElementNode>>,
}

impl SimpleOperation {
    pub fn new(op_type: impl Into<String>, cuts: Vec<CutNode>) -> Self {
        Self {
            op_type: op_type.into(),
            loops: 1,
            passes: 1,
            output: true,
            coolant: 0,
            settings: None,
            cuts,
            children: Vec::new(),
        }
    }
}

impl OperationNode for SimpleOperation {
    fn op_type(&self) -> &str {
        &self.op_type
    }

    fn loops(&self) -> u32 {
        self.loops
    }

    fn passes(&self) -> u32 {
        self.passes
    }

    fn output(&self) -> bool {
        self.output
    }

    fn coolant(&self) -> u8 {
        self.coolant
    }

    fn settings(&self) -> Option<Settings> {
        self.settings.clone()
    }

    fn children(&self) -> &[Rc<dyn ElementNode>] {
        &self.children
    }

    fn as_cutobjects(&self, _closed_distance: i32, passes: u32) -> Vec<CutNode> {
        self.cuts
            .iter()
            .cloned()
            .map(|mut c| {
                c.common_mut().passes = passes;
                c.common_mut().original_op = Some(self.op_type.clone());
                c
            })
            .collect()
    }

    fn cluster_copy(&self, indices: &[usize]) -> Option<Box<dyn OperationNode>> {
        Some(Box::new(SimpleOperation {
            op_type: self.op_type.clone(),
            loops: self.loops,
            passes: self.passes,
            output: self.output,
            coolant: self.coolant,
            settings: self.settings.clone(),
            cuts: indices.iter().filter_map(|&i| self.cuts.get(i).cloned()).collect(),
            children: indices.iter().filter_map(|&i| self.children.get(i).cloned()).collect(),
        }))
    }
}
