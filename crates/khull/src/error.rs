//! Error types for hull reconstruction.

use thiserror::Error;

/// Errors that can occur during hull reconstruction.
///
/// Everything else (dead ends, incomplete coverage, the neighbor-count
/// ceiling, the iteration ceiling) degrades to a best-effort hull instead
/// of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HullError {
    /// The input cloud has no points.
    #[error("point cloud is empty")]
    EmptyCloud,

    /// The angle sort left no admissible candidate direction at all.
    #[error("no admissible candidate direction from dataset point {vertex}")]
    NoAdmissibleCandidates {
        /// Dataset index of the point the walk was stuck at.
        vertex: usize,
    },
}

/// Result type for hull operations.
pub type Result<T> = std::result::Result<T, HullError>;
