//! Preprocess stage (spec §4.4 step 2). Grounded on
//! `cutplan.py::preprocess`: compute job bounds/outline, resolve
//! placements into device-space matrices, run raster bucketing ahead of
//! expansion, and drive the wordlist push/pop lifecycle around each
//! placement while emitting coolant console ops. For each op's children,
//! mirrors the original's per-node `hasattr` checks: simplify at
//! `opt_reduce_tolerance` when `opt_reduce_details` is set, translate any
//! wordlist-referencing text, then invoke the node's own preprocess hook.

use crate::geom::{Matrix, Point};
use crate::ops::OperationNode;
use crate::plan::{CutPlan, PlanItem};
use crate::raster::{bucket_rasters, Bbox};
use crate::wordlist::Wordlist;

/// One resolved device-space matrix a placement op yields. Spec §4.4: "if
/// none, a single identity-scaled scene→device matrix is used."
pub struct Placement {
    pub matrix: Matrix,
}

pub fn resolve_placements(explicit: &[Matrix]) -> Vec<Placement> {
    if explicit.is_empty() {
        vec![Placement { matrix: Matrix::identity() }]
    } else {
        explicit.iter().map(|&matrix| Placement { matrix }).collect()
    }
}

/// Union of every element's paint bounds across every op (spec §4.4:
/// "Compute job bounds (union of all placements)").
pub fn compute_bounds(ops: &[Box<dyn OperationNode>]) -> Option<(Point, Point)> {
    let mut acc: Option<(Point, Point)> = None;
    for op in ops {
        for child in op.children() {
            let Some((min, max)) = child.bbox() else { continue };
            acc = Some(match acc {
                None => (min, max),
                Some((amin, amax)) => (
                    Point::new(amin.x.min(min.x), amin.y.min(min.y)),
                    Point::new(amax.x.max(max.x), amax.y.max(max.y)),
                ),
            });
        }
    }
    acc
}

/// The device viewport outline derived from job bounds, as a closed
/// four-point rectangle.
pub fn outline_from_bounds(bounds: (Point, Point)) -> Vec<Point> {
    let (min, max) = bounds;
    vec![min, Point::new(max.x, min.y), max, Point::new(min.x, max.y)]
}

fn coolant_on_op(coolant: u8) -> &'static str {
    match coolant {
        1 => "air_assist_on",
        2 => "coolant_on",
        _ => "",
    }
}

fn coolant_off_op(coolant: u8) -> &'static str {
    match coolant {
        1 => "air_assist_off",
        2 => "coolant_off",
        _ => "",
    }
}

/// Replace every `op raster` in `ops` with one shallow-copied op per
/// spatial cluster of its children (spec §4.7 step 3), so a single raster
/// op never sweeps over large empty regions between disjoint artwork.
/// Grounded on `cutplan.py::optimize_rasters`'s "walk the op list in
/// reverse, splice in a copy per cluster, drop the original" loop — we
/// walk in reverse for the same reason: splicing doesn't disturb the
/// indices of ops not yet visited.
fn optimize_rasters(ops: &mut Vec<Box<dyn OperationNode>>, margin: crate::float_types::Real, plan: &mut CutPlan) {
    let mut split_count = 0usize;
    let mut cluster_count = 0usize;
    for idx in (0..ops.len()).rev() {
        if ops[idx].op_type() != "op raster" {
            continue;
        }
        // Children without paint bounds (e.g. a util child) are excluded
        // from clustering; `child_indices` maps each bbox back to its real
        // position in `children()` so `cluster_copy` receives indices into
        // the op's own child list, not into this filtered bbox vector.
        let (child_indices, bboxes): (Vec<usize>, Vec<Bbox>) = ops[idx]
            .children()
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.bbox().map(|b| (i, b)))
            .unzip();
        if bboxes.len() < 2 {
            continue;
        }
        let clusters = bucket_rasters(&bboxes, margin);
        if clusters.len() <= 1 {
            continue;
        }
        let Some(new_ops): Option<Vec<Box<dyn OperationNode>>> = clusters
            .iter()
            .map(|c| {
                let members: Vec<usize> = c.members.iter().map(|&m| child_indices[m]).collect();
                ops[idx].cluster_copy(&members)
            })
            .collect()
        else {
            // Host op type can't shallow-copy itself; leave it unsplit.
            continue;
        };
        split_count += 1;
        cluster_count += new_ops.len();
        ops.splice(idx..=idx, new_ops);
    }
    if split_count > 0 {
        plan.log(format!(
            "raster bucketing: inflated {} raster op(s) into {} cluster op(s)",
            split_count, cluster_count
        ));
    }
}

/// Run the preprocess stage: bounds/outline, raster bucketing, and the
/// placement × op loop with coolant console ops and the wordlist
/// push/pop lifecycle (spec §4.4 step 2).
pub fn run(
    plan: &mut CutPlan,
    ops: &mut Vec<Box<dyn OperationNode>>,
    wordlist: &mut Wordlist,
    explicit_placements: &[Matrix],
) {
    if let Some(bounds) = compute_bounds(ops) {
        plan.outline = Some(outline_from_bounds(bounds));
        plan.set_bounds(bounds);
    }

    if plan.config.opt_raster_optimisation {
        optimize_rasters(ops, plan.config.opt_raster_opt_margin, plan);
    }

    let placements = resolve_placements(explicit_placements);
    let simplify = plan.config.opt_reduce_details;
    let tolerance = plan.config.opt_reduce_tolerance;
    wordlist.push();
    for placement in &placements {
        for op in ops.iter_mut() {
            let coolant = op.coolant();
            if coolant != 0 {
                plan.plan.push(PlanItem::Console(coolant_on_op(coolant).to_string()));
            }
            let _ = op.preprocess(&placement.matrix);
            for child in op.children() {
                if simplify {
                    child.simplify(tolerance);
                }
                if let Some(raw) = child.mktext() {
                    child.set_translated_text(wordlist.substitute(raw));
                }
                child.preprocess(&placement.matrix);
            }
            if coolant != 0 {
                plan.plan.push(PlanItem::Console(coolant_off_op(coolant).to_string()));
            }
        }
        wordlist.current_mut().index += 1;
    }
    wordlist.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::ops::{ElementNode, SimpleOperation};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestElement {
        bbox: (Point, Point),
        mktext: Option<&'static str>,
        translated: RefCell<Option<String>>,
        simplify_calls: RefCell<Vec<crate::float_types::Real>>,
    }

    impl ElementNode for TestElement {
        fn bbox(&self) -> Option<(Point, Point)> {
            Some(self.bbox)
        }

        fn mktext(&self) -> Option<&str> {
            self.mktext
        }

        fn set_translated_text(&self, text: String) {
            *self.translated.borrow_mut() = Some(text);
        }

        fn simplify(&self, tolerance: crate::float_types::Real) {
            self.simplify_calls.borrow_mut().push(tolerance);
        }
    }

    #[test]
    fn no_placements_yields_single_identity_matrix() {
        let placements = resolve_placements(&[]);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].matrix, Matrix::identity());
    }

    #[test]
    fn raster_op_splits_into_one_op_per_disjoint_cluster() {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        let mut wordlist = Wordlist::new();
        let near = Rc::new(TestElement {
            bbox: (Point::new(0.0, 0.0), Point::new(5.0, 5.0)),
            mktext: None,
            translated: RefCell::new(None),
            simplify_calls: RefCell::new(Vec::new()),
        });
        let far = Rc::new(TestElement {
            bbox: (Point::new(100.0, 100.0), Point::new(105.0, 105.0)),
            mktext: None,
            translated: RefCell::new(None),
            simplify_calls: RefCell::new(Vec::new()),
        });
        let mut op = SimpleOperation::new("op raster", Vec::new());
        op.children = vec![near as Rc<dyn ElementNode>, far as Rc<dyn ElementNode>];
        let mut ops: Vec<Box<dyn OperationNode>> = vec![Box::new(op)];

        run(&mut plan, &mut ops, &mut wordlist, &[]);

        assert_eq!(ops.len(), 2, "disjoint raster children must split into separate ops");
        for op in &ops {
            assert_eq!(op.op_type(), "op raster");
            assert_eq!(op.children().len(), 1);
        }
    }

    #[test]
    fn wordlist_translates_text_nodes_during_preprocess() {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        let mut wordlist = Wordlist::new();
        wordlist.current_mut().values.insert("job".into(), vec!["demo".into()]);
        let text_element = Rc::new(TestElement {
            bbox: (Point::ORIGIN, Point::ORIGIN),
            mktext: Some("cutting {job}"),
            translated: RefCell::new(None),
            simplify_calls: RefCell::new(Vec::new()),
        });
        let mut op = SimpleOperation::new("op cut", Vec::new());
        op.children = vec![text_element.clone() as Rc<dyn ElementNode>];
        let mut ops: Vec<Box<dyn OperationNode>> = vec![Box::new(op)];

        run(&mut plan, &mut ops, &mut wordlist, &[]);

        assert_eq!(text_element.translated.borrow().as_deref(), Some("cutting demo"));
    }

    #[test]
    fn reduce_details_gates_geometry_simplify() {
        let mut config = PlanConfig::default();
        config.opt_reduce_details = true;
        config.opt_reduce_tolerance = 2.5;
        let mut plan = CutPlan::new("job", config);
        let mut wordlist = Wordlist::new();
        let element = Rc::new(TestElement {
            bbox: (Point::ORIGIN, Point::ORIGIN),
            mktext: None,
            translated: RefCell::new(None),
            simplify_calls: RefCell::new(Vec::new()),
        });
        let mut op = SimpleOperation::new("op cut", Vec::new());
        op.children = vec![element.clone() as Rc<dyn ElementNode>];
        let mut ops: Vec<Box<dyn OperationNode>> = vec![Box::new(op)];

        run(&mut plan, &mut ops, &mut wordlist, &[]);

        assert_eq!(*element.simplify_calls.borrow(), vec![2.5]);
    }

    #[test]
    fn coolant_ops_bracket_preprocess() {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        let mut wordlist = Wordlist::new();
        let mut op = SimpleOperation::new("op cut", Vec::new());
        op.coolant = 2;
        let mut ops: Vec<Box<dyn OperationNode>> = vec![Box::new(op)];
        run(&mut plan, &mut ops, &mut wordlist, &[]);
        let consoles: Vec<&str> = plan
            .plan
            .iter()
            .filter_map(|i| match i {
                PlanItem::Console(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(consoles, vec!["coolant_on", "coolant_off"]);
    }
}
