//! Loop expansion (spec §4.6, §8 invariant 9). An op with `loops = k > 1`
//! is materialized as `k` consecutive `LoopWrapper` instances before
//! optimization; the optimizer treats a loop-chain as indivisible and
//! never interleaves loops of the same op. After optimization only the
//! first wrapper of each chain survives — physical repetition is
//! reconstructed downstream via `implicit_passes`.

use crate::cut::CutNode;

/// Wraps one repetition of an op's cutcode within a loop chain.
#[derive(Debug, Clone)]
pub struct LoopWrapper {
    pub cuts: Vec<CutNode>,
    pub loop_index: u32,
    pub loop_total: u32,
}

impl LoopWrapper {
    pub fn is_first(&self) -> bool {
        self.loop_index == 0
    }
}

/// Expand `cuts` into `loops` consecutive wrapped chains. Non-integer or
/// sub-one loop counts are treated as 1 (spec §7: "Loop expansion rejects
/// non-integer loop counts by treating them as 1, logged to channel").
pub fn expand_loops(cuts: Vec<CutNode>, loops: u32) -> Vec<LoopWrapper> {
    let loops = loops.max(1);
    (0..loops)
        .map(|i| LoopWrapper {
            cuts: cuts.clone(),
            loop_index: i,
            loop_total: loops,
        })
        .collect()
}

/// Flatten a sequence of loop chains back into an ordered cut list,
/// keeping every repetition but never interleaving two chains.
pub fn flatten_loops(chains: &[LoopWrapper]) -> Vec<CutNode> {
    chains.iter().flat_map(|w| w.cuts.iter().cloned()).collect()
}

/// Keep only the first wrapper of each loop chain, per spec §4.6: after
/// optimization downstream devices reconstruct physical repetition via
/// `implicit_passes` rather than literal duplicate cutcode.
pub fn collapse_to_first(chains: Vec<LoopWrapper>) -> Vec<LoopWrapper> {
    chains.into_iter().filter(LoopWrapper::is_first).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;
    use crate::geom::Point;

    fn sample_cuts() -> Vec<CutNode> {
        vec![CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)))]
    }

    #[test]
    fn loops_expand_to_k_consecutive_chains() {
        let chains = expand_loops(sample_cuts(), 3);
        assert_eq!(chains.len(), 3);
        assert_eq!(chains[0].loop_total, 3);
        assert!(chains[0].is_first());
        assert!(!chains[1].is_first());
    }

    #[test]
    fn zero_loops_treated_as_one() {
        let chains = expand_loops(sample_cuts(), 0);
        assert_eq!(chains.len(), 1);
    }

    #[test]
    fn collapse_keeps_only_first_wrapper() {
        let chains = expand_loops(sample_cuts(), 4);
        let collapsed = collapse_to_first(chains);
        assert_eq!(collapsed.len(), 1);
    }

    #[test]
    fn flatten_preserves_every_repetition_without_interleaving() {
        let a = expand_loops(sample_cuts(), 2);
        let flat = flatten_loops(&a);
        assert_eq!(flat.len(), 2);
    }
}
