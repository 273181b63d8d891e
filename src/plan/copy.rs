//! Copy stage (spec §4.4 step 1). Grounded on
//! `cutplan.py::copy`/`copy-selected`: the original deep-copies reference
//! nodes along with their element targets; here, since operation nodes are
//! a host-owned `dyn OperationNode` tree this crate never mutates the
//! identity of, "copy" reduces to *selecting* which op indices the rest of
//! the pipeline processes.

/// Select operation indices to include in this plan. `copy-selected`
/// (`selected_only = true`) keeps only ops for which `is_selected` holds;
/// plain `copy` keeps everything.
pub fn select_ops(op_count: usize, is_selected: impl Fn(usize) -> bool, selected_only: bool) -> Vec<usize> {
    (0..op_count).filter(|&i| !selected_only || is_selected(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_all_keeps_every_index() {
        let selected = select_ops(5, |_| false, false);
        assert_eq!(selected, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn copy_selected_filters_by_predicate() {
        let selected = select_ops(5, |i| i % 2 == 0, true);
        assert_eq!(selected, vec![0, 2, 4]);
    }
}
