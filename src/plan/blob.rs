//! Blob stage (spec §4.4 step 5): `ops → CutCode`. Grounded on
//! `cutplan.py::blob`'s two iteration modes — "merge-ops + no-merge-passes"
//! (passes outermost, ops innermost) versus the default "ops first, each
//! yielding `copies` cutcodes" — and its `constrained` derivation.

use crate::config::PlanConfig;
use crate::cut::{CutCode, CutGroup};
use crate::ops::OperationNode;

/// Convert every non-util op into one or more `CutCode`s, respecting the
/// merge-ops/merge-passes iteration order (spec §4.4 step 5). Irregular
/// (util) ops pass through untouched by the caller — the blob stage only
/// ever emits cutcode for burnable ops.
pub fn blob(ops: &[Box<dyn OperationNode>], config: &PlanConfig) -> Vec<CutCode> {
    log::debug!("blob: {} ops, merge_ops={} merge_passes={}", ops.len(), config.opt_merge_ops, config.opt_merge_passes);
    let mut out = Vec::new();
    if config.opt_merge_ops && !config.opt_merge_passes {
        let max_passes = ops.iter().filter(|op| !op.is_util()).map(|op| op.passes()).max().unwrap_or(0);
        for pass_index in 0..max_passes {
            for op in ops {
                if op.is_util() || pass_index >= op.passes() {
                    continue;
                }
                out.push(make_cutcode(op.as_ref(), config, pass_index as i32, 1));
            }
        }
    } else {
        for op in ops {
            if op.is_util() {
                continue;
            }
            let copies = op.loops().max(1);
            for copy in 0..copies {
                out.push(make_cutcode(op.as_ref(), config, copy as i32, op.passes()));
            }
        }
    }
    log::trace!("blob: produced {} cutcodes", out.len());
    out
}

fn make_cutcode(op: &dyn OperationNode, config: &PlanConfig, pass_index: i32, passes: u32) -> CutCode {
    let cuts = op.as_cutobjects(config.opt_closed_distance, passes);
    let mut group = CutGroup::new(cuts);
    group.common.original_op = Some(op.op_type().to_string());
    group.common.pass_index = pass_index;
    group.constrained = op.op_type() == "op cut" && config.opt_inner_first;
    group.common.settings = op.settings();
    CutCode { group, output: op.output(), start_override: None }
}
