//! Ordered 2D point cloud with per-point status flags.

use khull_math::Point2;

/// Lifecycle status of a point inside a cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointStatus {
    /// The point participates in queries.
    #[default]
    Active,
    /// The point is logically deleted: skipped by queries, index preserved.
    Removed,
}

/// A 2D point enriched with its lifecycle status.
#[derive(Debug, Clone, Copy)]
pub struct CloudPoint {
    /// Spatial coordinates.
    pub coord: Point2,
    /// Lifecycle status.
    pub status: PointStatus,
}

impl CloudPoint {
    /// Create an active point at `coord`.
    pub fn new(coord: Point2) -> Self {
        Self {
            coord,
            status: PointStatus::Active,
        }
    }

    /// Is the point still active?
    pub fn is_active(&self) -> bool {
        self.status == PointStatus::Active
    }
}

/// An ordered, index-addressable 2D point cloud.
///
/// Indices are stable for the lifetime of the cloud: removal flips a
/// status flag instead of erasing the element. Callers that need an
/// independent cloud take a deep copy ([`Clone`] keeps statuses,
/// [`PointCloud::working_copy`] resets them).
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    points: Vec<CloudPoint>,
}

impl PointCloud {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a cloud of active points from raw coordinates.
    pub fn from_points(coords: &[Point2]) -> Self {
        coords.iter().copied().collect()
    }

    /// Number of contained points, active and removed alike.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud has no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Access a point by index.
    ///
    /// Panics when `index` is out of range; out-of-range access is a
    /// programming error, not a recoverable condition.
    pub fn get(&self, index: usize) -> &CloudPoint {
        &self.points[index]
    }

    /// Mutable access to a point by index. Panics when out of range.
    pub fn get_mut(&mut self, index: usize) -> &mut CloudPoint {
        &mut self.points[index]
    }

    /// Append a point to the cloud.
    pub fn push(&mut self, point: CloudPoint) {
        self.points.push(point);
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Iterate over the contained points.
    pub fn iter(&self) -> std::slice::Iter<'_, CloudPoint> {
        self.points.iter()
    }

    /// Iterate over point coordinates, in insertion order.
    pub fn coords(&self) -> impl Iterator<Item = &Point2> + '_ {
        self.points.iter().map(|p| &p.coord)
    }

    /// Number of points still active.
    pub fn active_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_active()).count()
    }

    /// Deep copy with every status reset to active.
    pub fn working_copy(&self) -> Self {
        self.points.iter().map(|p| p.coord).collect()
    }

    /// Mark the point at `index` as logically removed.
    pub fn remove(&mut self, index: usize) {
        self.points[index].status = PointStatus::Removed;
    }

    /// Restore the point at `index` to the active state.
    pub fn restore(&mut self, index: usize) {
        self.points[index].status = PointStatus::Active;
    }

    /// Axis-aligned bounds of the cloud, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb2> {
        if self.points.is_empty() {
            return None;
        }
        let mut aabb = Aabb2::empty();
        for p in &self.points {
            aabb.include_point(&p.coord);
        }
        Some(aabb)
    }
}

impl FromIterator<Point2> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(CloudPoint::new).collect(),
        }
    }
}

/// Axis-aligned bounding box in the cloud plane.
#[derive(Debug, Clone, Copy)]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb2 {
    /// Create an empty (inverted) box suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Expand the box to include a point.
    pub fn include_point(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
