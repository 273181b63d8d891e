//! Error taxonomy for the planner (spec §7).
//!
//! Most failure modes described by the spec are handled locally and never
//! reach a `Result`: plotters return empty iterators on degenerate input,
//! the candidate generator yields best-effort rather than stalling, and the
//! merge step silently declines. `PlanError` exists for the one case that
//! *does* propagate: an explicit guard detecting an impossible planning
//! configuration.

use thiserror::Error;

/// Errors that can stop the planner pipeline outright.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    /// Raised when an explicit guard in the planner detects an impossible
    /// configuration (e.g. a placement operation that resolves to zero
    /// device-space matrices while `output` was requested).
    #[error("planning failed: {0}")]
    PlanningFailure(String),

    /// A degenerate geometric input that a caller explicitly asked to be
    /// reported rather than silently coerced (e.g. `Matrix::inverse` on a
    /// singular matrix requested via a fallible entry point). The planner's
    /// own stages never raise this; plotters and the containment test
    /// degrade gracefully instead, per spec.
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
