//! Preopt stage (spec §4.4 step 7): inspect config flags and enqueue the
//! optimizer thunks that `execute` (spec §4.4 step 8) will run. Grounded
//! on `cutplan.py::preopt`, including the critical fallback whose absence
//! was a historical infinite-loop bug: if no optimizer flag applies,
//! `basic_cutcode_sequencing` is enqueued anyway so `burns_done` always
//! advances.

use crate::config::PlanConfig;
use crate::plan::{Command, CutPlan};

/// Populate `plan.commands` per spec §4.4 step 7. Returns the number of
/// commands enqueued (for diagnostics/tests).
pub fn run(plan: &mut CutPlan) -> usize {
    let config: &PlanConfig = &plan.config;
    if plan.plan.is_empty() {
        return 0;
    }

    let mut enqueued = Vec::new();
    if config.opt_reduce_travel && config.opt_nearest_neighbor {
        enqueued.push(Command::OptimizeTravel);
        if config.opt_2opt && !config.opt_inner_first {
            enqueued.push(Command::OptimizeTravel2Opt);
        }
    } else if config.opt_inner_first {
        enqueued.push(Command::OptimizeCuts);
    } else {
        // Critical fallback: without this, a plan with every optimizer flag
        // off would never advance `burns_done` and a naive spooler loop
        // would spin forever (spec §4.4 step 7's "historical infinite-loop
        // bug" note).
        log::warn!("preopt: no optimizer flag applies, falling back to basic_cutcode_sequencing");
        enqueued.push(Command::BasicCutcodeSequencing);
    }
    enqueued.push(Command::MergeCutcode);

    let count = enqueued.len();
    log::debug!("preopt: enqueued {:?}", enqueued);
    plan.commands.extend(enqueued);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{CutNode, LineCut};
    use crate::cut::CutCode;
    use crate::geom::Point;
    use crate::plan::PlanItem;

    fn plan_with_one_cut(config: PlanConfig) -> CutPlan {
        let mut plan = CutPlan::new("job", config);
        plan.plan.push(PlanItem::Cut(CutCode::new(vec![CutNode::Line(LineCut::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ))])));
        plan
    }

    #[test]
    fn empty_plan_enqueues_nothing() {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        assert_eq!(run(&mut plan), 0);
        assert!(plan.commands.is_empty());
    }

    #[test]
    fn reduce_travel_and_nn_enqueues_optimize_travel() {
        let mut config = PlanConfig::default();
        config.opt_inner_first = false;
        let mut plan = plan_with_one_cut(config);
        run(&mut plan);
        assert_eq!(plan.commands[0], Command::OptimizeTravel);
    }

    #[test]
    fn inner_first_without_travel_enqueues_optimize_cuts() {
        let mut config = PlanConfig::default();
        config.opt_reduce_travel = false;
        config.opt_inner_first = true;
        let mut plan = plan_with_one_cut(config);
        run(&mut plan);
        assert_eq!(plan.commands[0], Command::OptimizeCuts);
    }

    #[test]
    fn everything_off_falls_back_to_basic_sequencing() {
        let mut config = PlanConfig::default();
        config.opt_reduce_travel = false;
        config.opt_nearest_neighbor = false;
        config.opt_inner_first = false;
        let mut plan = plan_with_one_cut(config);
        run(&mut plan);
        assert_eq!(plan.commands[0], Command::BasicCutcodeSequencing);
    }

    #[test]
    fn merge_cutcode_is_always_enqueued_last() {
        let mut plan = plan_with_one_cut(PlanConfig::default());
        run(&mut plan);
        assert_eq!(*plan.commands.last().unwrap(), Command::MergeCutcode);
    }

    #[test]
    fn priority_hierarchy_prefers_inner_first_over_travel() {
        // Scenario 6: both opt_reduce_travel and opt_inner_first true with
        // opt_nearest_neighbor off should take the inner-first branch, not
        // the travel branch (opt_nearest_neighbor gates the travel path).
        let mut config = PlanConfig::default();
        config.opt_reduce_travel = true;
        config.opt_nearest_neighbor = false;
        config.opt_inner_first = true;
        let mut plan = plan_with_one_cut(config);
        run(&mut plan);
        assert_eq!(plan.commands[0], Command::OptimizeCuts);
    }
}
