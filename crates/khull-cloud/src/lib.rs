#![warn(missing_docs)]

//! Point cloud container and purification for the khull kernel.
//!
//! A [`PointCloud`] is an ordered, index-addressable collection of 2D
//! points where removal is logical (a status flag) rather than physical,
//! keeping indices stable for back-references during hull construction.
//! [`purify`] collapses near-duplicate points via a uniform spatial hash.

pub mod cloud;
pub mod purify;

pub use cloud::{Aabb2, CloudPoint, PointCloud, PointStatus};
pub use purify::purify;
