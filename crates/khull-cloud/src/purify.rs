//! Cloud purification: collapsing near-duplicate points.
//!
//! Points closer together than a linear tolerance collapse to a single
//! representative. A uniform spatial hash keyed by coordinate cells keeps
//! the scan at amortized O(1) lookups per point instead of an all-pairs
//! sweep.

use std::borrow::Cow;
use std::collections::HashMap;

use khull_math::Point2;

use crate::cloud::{CloudPoint, PointCloud};

/// Uniform grid mapping coordinate cells to the indices of the points
/// falling inside them.
struct CellFilter {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl CellFilter {
    fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: &Point2) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, index: usize, p: &Point2) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Collect the indices held by every cell overlapping `[min, max]`.
    fn query_box(&self, min: &Point2, max: &Point2, out: &mut Vec<usize>) {
        let (x0, y0) = self.cell_of(min);
        let (x1, y1) = self.cell_of(max);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                if let Some(bucket) = self.cells.get(&(ix, iy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
    }
}

/// Remove near-duplicate points from `cloud`.
///
/// Two points coincide when their Euclidean distance is below `tol`. Seeds
/// are processed in index order; each seed absorbs every point within `tol`
/// of it, and absorbed points never seed a cluster of their own. Survivors
/// keep their order of first encounter.
///
/// When nothing gets purged the input cloud is returned as-is; callers
/// must not assume a fresh allocation. A tolerance larger than the cloud
/// extent collapses everything onto the first point.
pub fn purify(cloud: &PointCloud, tol: f64) -> Cow<'_, PointCloud> {
    if cloud.is_empty() || tol <= 0.0 {
        return Cow::Borrowed(cloud);
    }

    let mut filter = CellFilter::new(tol);
    for (idx, p) in cloud.iter().enumerate() {
        filter.insert(idx, &p.coord);
    }

    let n = cloud.len();
    let mut absorbed = vec![false; n];
    let mut candidates = Vec::new();

    for seed in 0..n {
        if absorbed[seed] {
            continue;
        }
        let s = cloud.get(seed).coord;
        let min = Point2::new(s.x - tol, s.y - tol);
        let max = Point2::new(s.x + tol, s.y + tol);

        candidates.clear();
        filter.query_box(&min, &max, &mut candidates);

        for &idx in &candidates {
            if idx == seed || absorbed[idx] {
                continue;
            }
            if (cloud.get(idx).coord - s).norm() < tol {
                absorbed[idx] = true;
            }
        }
    }

    if !absorbed.iter().any(|&a| a) {
        return Cow::Borrowed(cloud);
    }

    let mut result = PointCloud::new();
    for (idx, p) in cloud.iter().enumerate() {
        if !absorbed[idx] {
            result.push(CloudPoint::new(p.coord));
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_removed() {
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        let purified = purify(&cloud, 1e-7);
        assert_eq!(purified.len(), 3);
        assert_eq!(purified.get(0).coord, Point2::new(0.0, 0.0));
        assert_eq!(purified.get(1).coord, Point2::new(1.0, 0.0));
        assert_eq!(purified.get(2).coord, Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_no_purge_aliases_input() {
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!(matches!(purify(&cloud, 1e-7), Cow::Borrowed(_)));
    }

    #[test]
    fn test_idempotent() {
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(1e-9, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0 + 1e-9),
            Point2::new(9.0, 1.0),
        ]);
        let once = purify(&cloud, 1e-7).into_owned();
        assert_eq!(once.len(), 3);
        let twice = purify(&once, 1e-7);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice.len(), 3);
    }

    #[test]
    fn test_containment_both_ways() {
        let tol = 0.5;
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.1, 0.1),
            Point2::new(3.0, 0.0),
            Point2::new(3.2, 0.0),
            Point2::new(0.0, 4.0),
        ]);
        let purified = purify(&cloud, tol);

        // Every survivor is an original point.
        for kept in purified.coords() {
            assert!(cloud.coords().any(|orig| orig == kept));
        }
        // Every original point has a representative within tolerance.
        for orig in cloud.coords() {
            assert!(purified.coords().any(|kept| (orig - kept).norm() < tol));
        }
    }

    #[test]
    fn test_huge_tolerance_collapses_to_first_point() {
        let cloud = PointCloud::from_points(&[
            Point2::new(0.5, 0.5),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
        ]);
        let purified = purify(&cloud, 1e3);
        assert_eq!(purified.len(), 1);
        assert_eq!(purified.get(0).coord, Point2::new(0.5, 0.5));
    }

    #[test]
    fn test_zero_tolerance_is_noop() {
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
        ]);
        let purified = purify(&cloud, 0.0);
        assert!(matches!(purified, Cow::Borrowed(_)));
        assert_eq!(purified.len(), 2);
    }

    #[test]
    fn test_cluster_keeps_first_seed() {
        // A transitive chain: b is within tol of a, c within tol of b but
        // not of a. The seed absorbs b only; c survives as its own seed.
        let cloud = PointCloud::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.9, 0.0),
            Point2::new(1.8, 0.0),
        ]);
        let purified = purify(&cloud, 1.0);
        assert_eq!(purified.len(), 2);
        assert_eq!(purified.get(0).coord, Point2::new(0.0, 0.0));
        assert_eq!(purified.get(1).coord, Point2::new(1.8, 0.0));
    }
}
