//! Concave hull reconstruction by the k-nearest-neighbors walk.
//!
//! The boundary starts at the lowest point of the cloud and grows by
//! jumping to the best of the k nearest unvisited points, preferring the
//! sharpest admissible clockwise turn that keeps the boundary free of
//! self-intersections. Whenever the walk dead-ends or the finished
//! boundary fails to enclose the whole cloud, the attempt restarts from
//! scratch with a larger k.

use std::cmp::Ordering;

use khull_cloud::{purify, PointCloud};
use khull_math::{signed_angle, Point2, Vec2, RESOLUTION};

use crate::error::{HullError, Result};
use crate::polygon::Polygon;
use crate::HullSettings;

/// Hard ceiling for the neighbor count.
///
/// Growth past this halts the retries with whatever hull the previous
/// attempt produced.
pub const K_LIMIT: usize = 25;

/// Angles with absolute value below this snap to exactly zero.
const ANGLE_SNAP: f64 = 1e-6;

/// Reconstruct a concave hull enclosing every point of `cloud`.
///
/// The input is purified at the configured tolerance first; a purified
/// cloud of three or fewer points is its own hull. Dead ends and
/// incomplete coverage restart the walk with a larger neighbor count,
/// and both the [`K_LIMIT`] ceiling and the iteration ceiling degrade to
/// a best-effort result rather than failing.
///
/// # Errors
///
/// [`HullError::EmptyCloud`] when the input has no points, and
/// [`HullError::NoAdmissibleCandidates`] when the angle sort leaves no
/// candidate direction at all.
pub fn concave_hull(cloud: &PointCloud, settings: &HullSettings) -> Result<Polygon> {
    if cloud.is_empty() {
        tracing::error!("hull reconstruction on an empty point cloud");
        return Err(HullError::EmptyCloud);
    }

    // The requested count stays the base the retry growth builds on, even
    // when the effective count gets clamped here.
    let mut k_base = settings.neighbors;
    let mut k = settings.neighbors;
    if k < 2 {
        tracing::warn!(requested = settings.neighbors, "neighbor count below minimum, clamped to 2");
        k = 2;
    }
    if k > K_LIMIT {
        tracing::warn!(
            requested = settings.neighbors,
            limit = K_LIMIT,
            "neighbor count above the ceiling, clamped"
        );
        k = K_LIMIT;
    }

    let purified = purify(cloud, settings.tolerance);
    if purified.len() <= 3 {
        return Ok(Polygon::new(purified.coords().copied().collect()));
    }

    let mut builder = Builder {
        cloud: purified.as_ref(),
        hull: Polygon::default(),
        iterations: 0,
        max_iterations: settings.max_iterations,
    };

    loop {
        let effective = k.min(purified.len() - 1);
        if effective > K_LIMIT {
            tracing::warn!(
                limit = K_LIMIT,
                "neighbor count reached the ceiling, keeping the last hull"
            );
            return Ok(builder.hull);
        }

        match builder.attempt(effective)? {
            Outcome::Complete | Outcome::Halted => return Ok(builder.hull),
            Outcome::Retry(reason) => {
                let grown = k_base + 1;
                k_base += 1;
                tracing::warn!(
                    from = effective,
                    to = grown,
                    ?reason,
                    "restarting the walk with more neighbors"
                );
                k = grown;
            }
        }
    }
}

/// How one walk attempt ended.
enum Outcome {
    /// The boundary closed (or already covers every point).
    Complete,
    /// The iteration ceiling was hit; keep the partial hull.
    Halted,
    /// The attempt failed; restart with a larger neighbor count.
    Retry(RetryReason),
}

#[derive(Debug, Clone, Copy)]
enum RetryReason {
    /// Every candidate edge crossed the boundary built so far.
    DeadEnd,
    /// The finished boundary left input points outside.
    Coverage,
}

/// State shared across the retry attempts of one reconstruction.
struct Builder<'a> {
    /// Purified input; coverage is always checked against it.
    cloud: &'a PointCloud,
    hull: Polygon,
    /// Iteration counter, shared across attempts.
    iterations: usize,
    max_iterations: usize,
}

impl Builder<'_> {
    /// One full walk with a fixed neighbor count over a fresh working copy.
    fn attempt(&mut self, k: usize) -> Result<Outcome> {
        self.hull.points.clear();

        let mut dataset = self.cloud.working_copy();

        let (seed_idx, seed) = min_y_point(&dataset);
        self.hull.points.push(seed);
        dataset.remove(seed_idx);

        let mut current = seed;
        let mut current_idx = seed_idx;
        let mut step = 2usize;

        while (step == 2 || (current - seed).norm_squared() > RESOLUTION * RESOLUTION)
            && !dataset.is_empty()
        {
            self.iterations += 1;
            if self.max_iterations > 0 && self.iterations >= self.max_iterations {
                tracing::warn!(
                    limit = self.max_iterations,
                    "iteration ceiling reached, keeping the partial hull"
                );
                return Ok(Outcome::Halted);
            }

            if self.all_covered() {
                return Ok(Outcome::Complete);
            }

            if step == 5 {
                // Far enough from the start: let the walk close back onto it.
                dataset.restore(seed_idx);
            }

            let neighbors = nearest_points(&dataset, current_idx, k);
            let candidates = sort_by_angle(&neighbors, &dataset, &self.hull);
            if candidates.is_empty() {
                tracing::error!(vertex = current_idx, "no admissible candidate direction");
                return Err(HullError::NoAdmissibleCandidates {
                    vertex: current_idx,
                });
            }

            let mut accepted = None;
            for &idx in &candidates {
                let candidate = dataset.get(idx).coord;
                if !self.hull.intersects_segment(&current, &candidate) {
                    accepted = Some(idx);
                    break;
                }
            }

            let Some(next_idx) = accepted else {
                return Ok(Outcome::Retry(RetryReason::DeadEnd));
            };

            if next_idx == seed_idx {
                break; // the walk closed back onto the seed
            }

            current = dataset.get(next_idx).coord;
            current_idx = next_idx;
            step += 1;

            self.hull.points.push(current);
            dataset.remove(next_idx);
        }

        if self.all_covered() {
            Ok(Outcome::Complete)
        } else {
            Ok(Outcome::Retry(RetryReason::Coverage))
        }
    }

    /// Is every purified input point inside or on the hull built so far?
    fn all_covered(&self) -> bool {
        self.cloud.coords().all(|p| self.hull.contains(p))
    }
}

/// Index and coordinates of the lowest point, first encountered on ties.
fn min_y_point(cloud: &PointCloud) -> (usize, Point2) {
    let mut best = 0usize;
    let mut min_y = f64::INFINITY;
    for (idx, p) in cloud.iter().enumerate() {
        if p.coord.y < min_y {
            min_y = p.coord.y;
            best = idx;
        }
    }
    (best, cloud.get(best).coord)
}

/// Indices of up to `k` active points nearest to `origin_idx`, closest
/// first. Distance ties keep dataset index order (the sort is stable).
fn nearest_points(dataset: &PointCloud, origin_idx: usize, k: usize) -> Vec<usize> {
    let origin = dataset.get(origin_idx).coord;

    // Scratch (distance, index) pairs live only for this query.
    let mut by_dist: Vec<(f64, usize)> = Vec::new();
    for (idx, p) in dataset.iter().enumerate() {
        if idx == origin_idx || !p.is_active() {
            continue;
        }
        by_dist.push(((p.coord - origin).norm_squared(), idx));
    }

    by_dist.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    by_dist.truncate(k);
    by_dist.into_iter().map(|(_, idx)| idx).collect()
}

/// Candidate indices ordered by the turn their direction makes against
/// the last hull edge. Negative turns wrap into the (π, 2π) range;
/// near-zero turns (straight back along the edge) drop out.
fn sort_by_angle(candidates: &[usize], dataset: &PointCloud, hull: &Polygon) -> Vec<usize> {
    let n = hull.len();
    let last = hull.points[n - 1];

    // Direction looking backward along the last hull edge; an artificial
    // -X direction bootstraps the very first step.
    let back_dir: Vec2 = if n == 1 {
        -Vec2::x()
    } else {
        hull.points[n - 2] - last
    };

    // Scratch (angle, index) pairs live only for this sort.
    let mut by_angle: Vec<(f64, usize)> = Vec::new();
    for &idx in candidates {
        let dir = dataset.get(idx).coord - last;
        let mut ang = signed_angle(&dir, &back_dir);
        if ang.abs() < ANGLE_SNAP {
            ang = 0.0;
        } else if ang < 0.0 {
            ang += std::f64::consts::TAU;
        }
        if ang > 0.0 {
            by_angle.push((ang, idx));
        }
    }

    by_angle.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    by_angle.into_iter().map(|(_, idx)| idx).collect()
}
