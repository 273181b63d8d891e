//! Travel and ordering optimization (spec §4.5–§4.8). Splits the
//! original's single monolithic `short_travel_cutcode`/`inner_first_ident`
//! pass into composable stages: candidate snapshotting, greedy NN travel,
//! grid-accelerated travel for medium batches, optional 2-opt refinement,
//! and a level-based hierarchical scheduler for heavily nested geometry.

pub mod candidate;
pub mod hierarchical;
pub mod kdtree;
pub mod spatial;
pub mod two_opt;
pub mod travel;

pub use candidate::Candidate;
pub use hierarchical::HierarchyContext;
pub use travel::optimize_travel;
pub use two_opt::two_opt_refine;
