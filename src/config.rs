//! Planner configuration (spec §6's knob table, [AMBIENT] §2). Mirrors
//! the flat, `serde`-deserializable settings-struct convention used by
//! `core-config` in the sibling example pack: one struct, one `Default`
//! impl, loadable from TOML/JSON by a host.

use crate::float_types::Real;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub opt_reduce_travel: bool,
    pub opt_nearest_neighbor: bool,
    pub opt_2opt: bool,
    pub opt_inner_first: bool,
    pub opt_inners_grouped: bool,
    pub opt_complete_subpaths: bool,
    pub opt_reduce_details: bool,
    pub opt_reduce_tolerance: Real,
    pub opt_inner_tolerance: Real,
    pub opt_merge_ops: bool,
    pub opt_merge_passes: bool,
    pub opt_closed_distance: i32,
    pub opt_jog_minimum: Real,
    pub opt_rapid_between: bool,
    pub opt_raster_optimisation: bool,
    pub opt_raster_opt_margin: Real,
    pub opt_effect_combine: bool,
    pub opt_remove_overlap: bool,
    pub opt_reduce_directions: bool,
    /// Extract skip groups (hatch fills) to be optimized separately from
    /// the rest of the candidate set (spec §4.6 Hatch/skip handling).
    pub hatch_optimize: bool,
    /// Maximum 2-opt passes (spec §4.6).
    pub max_2opt_passes: u32,
    /// Use the hierarchical level-based scheduler (spec §4.8) instead of
    /// the primary inner-first optimizer.
    pub use_hierarchical: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            opt_reduce_travel: true,
            opt_nearest_neighbor: true,
            opt_2opt: false,
            opt_inner_first: true,
            opt_inners_grouped: false,
            opt_complete_subpaths: false,
            opt_reduce_details: false,
            opt_reduce_tolerance: 10.0,
            opt_inner_tolerance: 0.0,
            opt_merge_ops: false,
            opt_merge_passes: false,
            opt_closed_distance: 15,
            opt_jog_minimum: 127.0,
            opt_rapid_between: true,
            opt_raster_optimisation: true,
            opt_raster_opt_margin: 0.0,
            opt_effect_combine: false,
            opt_remove_overlap: false,
            opt_reduce_directions: false,
            hatch_optimize: true,
            max_2opt_passes: 50,
            use_hierarchical: false,
        }
    }
}
