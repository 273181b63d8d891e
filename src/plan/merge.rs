//! Merge stage (spec §4.4 step 6, §4.6 `_should_merge`). Grounded on
//! `cutplan.py::merge_cutcode`/`_should_merge`: adjacent blobbed
//! `CutCode`s concatenate into one accumulator when all five predicates
//! hold; otherwise the accumulator closes and a new one starts.

use crate::config::PlanConfig;
use crate::cut::CutCode;
use crate::settings::settings_same_op;

/// The five-condition merge predicate (spec §4.6). `a` is the running
/// accumulator, `b` the next blobbed `CutCode` under consideration.
pub fn should_merge(a: &CutCode, b: &CutCode, config: &PlanConfig) -> bool {
    let a_op = a.group.common.original_op.as_deref();
    let b_op = b.group.common.original_op.as_deref();

    let neither_util = !a_op.is_some_and(|o| o.starts_with("util")) && !b_op.is_some_and(|o| o.starts_with("util"));
    let passes_ok = config.opt_merge_passes || a.group.common.pass_index == b.group.common.pass_index;
    let settings_ok = config.opt_merge_ops
        || match (&a.group.common.settings, &b.group.common.settings) {
            (Some(sa), Some(sb)) => settings_same_op(sa, sb),
            (None, None) => true,
            _ => false,
        };
    let inner_first_ok = config.opt_inner_first || a_op != Some("op cut");

    neither_util && passes_ok && settings_ok && inner_first_ok
}

/// Walk `blobbed` left to right, concatenating adjacent `CutCode`s whose
/// predicate holds. If any merged item was `constrained`, the merged
/// accumulator becomes `constrained` too (spec §4.6: "If any constrained
/// item merges into the accumulator, the accumulator becomes constrained").
pub fn merge(blobbed: Vec<CutCode>, config: &PlanConfig) -> Vec<CutCode> {
    let before = blobbed.len();
    let mut out: Vec<CutCode> = Vec::with_capacity(blobbed.len());
    for next in blobbed {
        match out.last_mut() {
            Some(last) if should_merge(last, &next, config) => {
                let constrained = last.group.constrained || next.group.constrained;
                last.group.children.extend(next.group.children);
                last.group.constrained = constrained;
            }
            _ => out.push(next),
        }
    }
    log::debug!("merge: {} cutcodes merged down to {}", before, out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{CutNode, LineCut};
    use crate::geom::Point;

    fn cutcode(op: &str, pass_index: i32) -> CutCode {
        let mut code = CutCode::new(vec![CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)))]);
        code.group.common.original_op = Some(op.to_string());
        code.group.common.pass_index = pass_index;
        code
    }

    #[test]
    fn same_op_same_pass_merges() {
        let config = PlanConfig::default();
        let a = cutcode("op cut", 0);
        let b = cutcode("op cut", 0);
        assert!(should_merge(&a, &b, &config));
    }

    #[test]
    fn util_ops_never_merge() {
        let config = PlanConfig::default();
        let a = cutcode("util wait", 0);
        let b = cutcode("op cut", 0);
        assert!(!should_merge(&a, &b, &config));
    }

    #[test]
    fn merge_concatenates_children_and_propagates_constrained() {
        let config = PlanConfig::default();
        let mut a = cutcode("op engrave", 0);
        a.group.constrained = true;
        let b = cutcode("op engrave", 0);
        let merged = merge(vec![a, b], &config);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len_flat(), 2);
        assert!(merged[0].group.constrained);
    }

    #[test]
    fn different_pass_index_blocks_merge_unless_opt_merge_passes() {
        let mut config = PlanConfig::default();
        config.opt_merge_passes = false;
        let a = cutcode("op cut", 0);
        let b = cutcode("op cut", 1);
        assert!(!should_merge(&a, &b, &config));
        config.opt_merge_passes = true;
        assert!(should_merge(&a, &b, &config));
    }
}
