#![warn(missing_docs)]

//! K-nearest-neighbors concave hull reconstruction for 2D point clouds.
//!
//! Implements the approach of Moreira and Santos ("Concave Hull: A
//! K-nearest Neighbours Approach for the Computation of the Region
//! Occupied by a Set of Points"): starting from the lowest point, the
//! boundary grows by jumping to the best of the k nearest unvisited
//! points, and backtracks to a larger k whenever it would self-intersect
//! or fails to enclose the whole cloud. The result may have concavities,
//! unlike a convex hull, at the price of retry-driven coarsening on
//! difficult clouds.
//!
//! # Example
//!
//! ```
//! use khull::{concave_hull, HullSettings};
//! use khull_cloud::PointCloud;
//! use khull_math::Point2;
//!
//! let cloud = PointCloud::from_points(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//! let hull = concave_hull(&cloud, &HullSettings::default())?;
//! assert_eq!(hull.len(), 4);
//! # Ok::<(), khull::HullError>(())
//! ```

pub mod error;
pub mod hull;
pub mod polygon;

pub use error::{HullError, Result};
pub use hull::{concave_hull, K_LIMIT};
pub use polygon::{segment_intersection, Polygon};

use khull_math::Tolerance;
use serde::{Deserialize, Serialize};

/// Hull reconstruction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullSettings {
    /// Number of nearest neighbors consulted at each step of the walk.
    /// Values outside `[2, K_LIMIT]` are clamped with a warning.
    pub neighbors: usize,
    /// Linear tolerance for collapsing coincident input points.
    pub tolerance: f64,
    /// Iteration ceiling across all retries (0 = unlimited). Reaching it
    /// halts with the partial hull rather than failing.
    pub max_iterations: usize,
}

impl Default for HullSettings {
    fn default() -> Self {
        Self {
            neighbors: 5,
            tolerance: Tolerance::DEFAULT.linear,
            max_iterations: 0,
        }
    }
}
