//! Execute/Final stages (spec §4.4 steps 3, 8, 9). Grounded on
//! `cutplan.py::execute`'s "copy commands, clear the queue, run each,
//! repeat" loop: draining absorbs commands newly appended during the
//! drain itself, since an optimizer thunk may enqueue follow-up work
//! (e.g. `optimize_travel` wanting a trailing `merge_cutcode`).

use crate::config::PlanConfig;
use crate::cut::CutGroup;
use crate::hatch::extract_skip_groups;
use crate::optimize::two_opt_refine;
use crate::optimize::optimize_travel;
use crate::plan::merge::merge;
use crate::plan::{Command, CutPlan, PlanItem};

/// A scalar with `burns_done < passes` has not been fully burned; used by
/// `basic_cutcode_sequencing`'s forced sweep.
fn basic_cutcode_sequencing(plan: &mut CutPlan) {
    for code in plan.cutcodes_mut() {
        for node in code.group.iter_flat_mut() {
            node.set_burns_done(node.common().passes);
        }
    }
}

/// Both `OptimizeCuts` (inner-first path, no travel optimization enabled)
/// and `OptimizeTravel` drive the same NN-greedy core: the candidate
/// generator it consumes already encodes the inner-first/grouped-inner
/// constraints (spec §4.5), so "inner-first scheduling without travel
/// minimization" and "travel minimization respecting inner-first" are the
/// same traversal — only the config knobs that got us here differ. See
/// DESIGN.md.
fn run_travel_pass(plan: &mut CutPlan) {
    let grouped_inner = plan.config.opt_inners_grouped;
    let complete_path = plan.config.opt_complete_subpaths;
    let hatch_optimize = plan.config.hatch_optimize;
    let start = plan.start;
    for code in plan.cutcodes_mut() {
        if hatch_optimize {
            let children = std::mem::take(&mut code.group.children);
            let (non_skip, skip) = extract_skip_groups(children);

            let mut non_skip_group = CutGroup::new(non_skip);
            let mut ordered = optimize_travel(&mut non_skip_group, complete_path, grouped_inner, start);

            if !skip.is_empty() {
                let skip_start = ordered.last().and_then(|c| c.end()).or(start);
                let mut skip_group = CutGroup::new(skip);
                let ordered_skip =
                    optimize_travel(&mut skip_group, complete_path, grouped_inner, skip_start);
                ordered.extend(ordered_skip);
            }
            code.group.children = ordered;
        } else {
            let ordered = optimize_travel(&mut code.group, complete_path, grouped_inner, start);
            code.group.children = ordered;
        }
    }
}

fn run_optimize_travel_2opt(plan: &mut CutPlan) {
    let max_passes = plan.config.max_2opt_passes;
    for code in plan.cutcodes_mut() {
        two_opt_refine(&mut code.group.children, max_passes);
    }
}

fn run_merge_cutcode(plan: &mut CutPlan) {
    let config: PlanConfig = plan.config.clone();
    let mut rest = Vec::with_capacity(plan.plan.len());
    let blobbed: Vec<_> = plan
        .plan
        .drain(..)
        .filter_map(|item| match item {
            PlanItem::Cut(c) => Some(c),
            other => {
                rest.push(other);
                None
            }
        })
        .collect();
    let merged = merge(blobbed, &config);
    plan.plan = rest;
    plan.plan.extend(merged.into_iter().map(PlanItem::Cut));
}

fn dispatch(plan: &mut CutPlan, command: Command) {
    log::trace!("dispatch: {:?}", command);
    match command {
        Command::OptimizeTravel => run_travel_pass(plan),
        Command::OptimizeTravel2Opt => run_optimize_travel_2opt(plan),
        Command::OptimizeCuts => run_travel_pass(plan),
        Command::BasicCutcodeSequencing => basic_cutcode_sequencing(plan),
        Command::MergeCutcode => run_merge_cutcode(plan),
    }
}

/// Drain `plan.commands` until empty, running each in turn. A command may
/// append further commands to the same queue (none of ours currently do,
/// but the drain loop honors it either way, per `cutplan.py::execute`).
pub fn execute(plan: &mut CutPlan) {
    log::info!("execute: draining {} queued commands", plan.commands.len());
    while !plan.commands.is_empty() {
        let batch: Vec<Command> = plan.commands.drain(..).collect();
        for command in batch {
            dispatch(plan, command);
        }
    }
}

/// Drain `plan.spool_commands` the same way, immediately before handoff
/// to the spooler (spec §4.4 step 9).
pub fn finalize(plan: &mut CutPlan) {
    while !plan.spool_commands.is_empty() {
        let batch: Vec<Command> = plan.spool_commands.drain(..).collect();
        for command in batch {
            dispatch(plan, command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{CutNode, LineCut};
    use crate::geom::Point;
    use crate::plan::preopt;

    fn plan_with_one_pass_rect(passes: u32) -> CutPlan {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        let mut code = CutCode::new(vec![CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)))]);
        code.group.common.passes = passes;
        for child in code.group.children.iter_mut() {
            child.common_mut().passes = passes;
        }
        plan.plan.push(PlanItem::Cut(code));
        plan
    }

    use crate::cut::CutCode;

    #[test]
    fn basic_sequencing_advances_burns_done_without_optimizer_flags() {
        let mut config = PlanConfig::default();
        config.opt_reduce_travel = false;
        config.opt_nearest_neighbor = false;
        config.opt_inner_first = false;
        let mut plan = plan_with_one_pass_rect(3);
        plan.config = config;
        preopt::run(&mut plan);
        execute(&mut plan);
        for code in plan.cutcodes() {
            for node in code.iter_flat() {
                assert!(node.is_burned());
            }
        }
    }

    #[test]
    fn optimize_travel_advances_burns_done() {
        let mut plan = plan_with_one_pass_rect(1);
        preopt::run(&mut plan);
        execute(&mut plan);
        for code in plan.cutcodes() {
            for node in code.iter_flat() {
                assert!(node.is_burned());
            }
        }
    }
}
