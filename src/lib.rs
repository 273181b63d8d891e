//! Cut-planning core for a laser-cutter controller.
//!
//! This crate is the hard-engineering subsystem that sits between a
//! user-authored operation tree (vector/raster artwork grouped into ops)
//! and a motion controller's spooler: it owns the cut-primitive algebra,
//! the planner pipeline (`copy → preprocess → blob → merge → preopt →
//! optimize → final`), the scan-beam containment analyzer, the travel
//! optimizers (greedy NN, spatial-grid, 2-opt, hierarchical), raster
//! bucketing, and the Bresenham/Zingl integer plotters. File import, GUI,
//! transport framing, and device-specific command encoding are external
//! collaborators represented only by the `ops::OperationNode` /
//! `ops::ElementNode` trait boundary a host implements.
//!
//! # Features
//! - **parallel**: parallelize independent per-cell nearest-neighbor work
//!   in the spatial travel optimizer via `rayon`. Off by default — the
//!   planner's baseline scheduling model is single-threaded cooperative.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::all)]

pub mod config;
pub mod containment;
pub mod cut;
pub mod errors;
pub mod float_types;
pub mod geom;
pub mod hatch;
pub mod loops;
pub mod ops;
pub mod optimize;
pub mod plan;
pub mod raster;
pub mod settings;
pub mod wordlist;

pub use config::PlanConfig;
pub use cut::{CutCode, CutGroup, CutNode};
pub use errors::{PlanError, PlanResult};
pub use plan::CutPlan;
