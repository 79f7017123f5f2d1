//! Polygon type and the planar primitives used by hull construction.

use khull_math::{Point2, RESOLUTION};

/// A 2D polygon given as an ordered vertex list.
///
/// The closing edge from the last vertex back to the first is implicit.
/// Insertion order is the winding order.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    /// Vertices of the polygon in order.
    pub points: Vec<Point2>,
}

impl Polygon {
    /// Create a polygon from points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Check if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Signed area of the polygon.
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Is the polygon counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Perimeter length.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            length += (self.points[j] - self.points[i]).norm();
        }
        length
    }

    /// Even-odd ray-casting membership test; the boundary counts as inside.
    ///
    /// A query point coinciding with a vertex is inside immediately.
    /// Edges horizontal at the query height get a dedicated parity rule
    /// (flip when the query lies left of both endpoints), the rest go
    /// through the straddle test against a horizontal ray.
    pub fn contains(&self, p: &Point2) -> bool {
        let q = *p;
        let n = self.points.len();
        let mut inside = false;

        for i in 0..n {
            let j = if i == n - 1 { 0 } else { i + 1 };
            let pi = self.points[i];
            let pj = self.points[j];

            if (q - pi).norm_squared() < RESOLUTION * RESOLUTION {
                return true;
            }

            if (q.y - pi.y).abs() > RESOLUTION || (q.y - pj.y).abs() > RESOLUTION {
                // Only edges straddling the ray height can be crossed.
                if (q.y < pi.y) == (q.y < pj.y) {
                    continue;
                }
                // Count crossings to the right of the query point.
                let x_cross = (pj.x - pi.x) * (q.y - pi.y) / (pj.y - pi.y) + pi.x;
                if q.x < x_cross {
                    inside = !inside;
                }
            } else {
                // Horizontal edge at the ray height.
                if q.x < pi.x && q.x < pj.x {
                    inside = !inside;
                }
            }
        }

        inside
    }

    /// Does the segment `a`-`b` cross any edge of the polygon?
    ///
    /// Edges sharing an endpoint with `a` or `b` are skipped: adjacent
    /// segments meeting at a vertex do not count as crossings.
    pub fn intersects_segment(&self, a: &Point2, b: &Point2) -> bool {
        let eps2 = RESOLUTION * RESOLUTION;
        let n = self.points.len();
        if n <= 1 {
            return false;
        }

        for i in 0..n {
            let j = if i == n - 1 { 0 } else { i + 1 };
            let pi = self.points[i];
            let pj = self.points[j];

            if (a - pi).norm_squared() < eps2
                || (a - pj).norm_squared() < eps2
                || (b - pi).norm_squared() < eps2
                || (b - pj).norm_squared() < eps2
            {
                continue;
            }

            if segment_intersection(a, b, &pi, &pj).is_some() {
                return true;
            }
        }

        false
    }

    /// Is the polygon simple, i.e. do no two non-adjacent edges intersect?
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 4 {
            return true;
        }
        for i in 0..n {
            let a0 = self.points[i];
            let a1 = self.points[(i + 1) % n];
            for k in (i + 2)..n {
                if i == 0 && k == n - 1 {
                    continue; // the closing edge is adjacent to the first
                }
                let b0 = self.points[k];
                let b1 = self.points[(k + 1) % n];
                if segment_intersection(&a0, &a1, &b0, &b1).is_some() {
                    return false;
                }
            }
        }
        true
    }
}

/// Intersection point of segments `a0`-`a1` and `b0`-`b1`, if any.
///
/// Parallel and collinear pairs report no intersection; touching at an
/// endpoint counts as one.
pub fn segment_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    let eps = 1e-10;
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < eps {
        return None;
    }

    let diff = b0 - a0;
    let t = (diff.x * db.y - diff.y * db.x) / cross;
    let s = (diff.x * da.y - diff.y * da.x) / cross;

    if t >= -eps && t <= 1.0 + eps && s >= -eps && s <= 1.0 + eps {
        Some(Point2::new(a0.x + t * da.x, a0.y + t * da.y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_signed_area_and_winding() {
        let square = unit_square();
        assert_relative_eq!(square.signed_area(), 1.0);
        assert!(square.is_ccw());

        let mut reversed = square.clone();
        reversed.points.reverse();
        assert_relative_eq!(reversed.signed_area(), -1.0);
        assert!(!reversed.is_ccw());
    }

    #[test]
    fn test_perimeter() {
        assert_relative_eq!(unit_square().perimeter(), 4.0);
    }

    #[test]
    fn test_contains_interior_and_exterior() {
        let square = unit_square();
        assert!(square.contains(&Point2::new(0.5, 0.5)));
        assert!(!square.contains(&Point2::new(2.0, 0.5)));
        assert!(!square.contains(&Point2::new(0.5, -0.5)));
    }

    #[test]
    fn test_contains_every_vertex() {
        let square = unit_square();
        for p in &square.points {
            assert!(square.contains(p), "vertex {p} must be inside");
        }
    }

    #[test]
    fn test_contains_point_on_horizontal_edge() {
        let square = unit_square();
        // Mid-point of the bottom edge: level with a horizontal edge.
        assert!(square.contains(&Point2::new(0.5, 0.0)));
        // Off the edge height, left of the polygon.
        assert!(!square.contains(&Point2::new(-1.0, 0.5)));
    }

    #[test]
    fn test_contains_concave() {
        // L-shaped polygon: the notch at the top right is outside.
        let ell = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!(ell.contains(&Point2::new(0.5, 1.5)));
        assert!(ell.contains(&Point2::new(1.5, 0.5)));
        assert!(!ell.contains(&Point2::new(1.5, 1.5)));
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let p = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, 0.5);
    }

    #[test]
    fn test_segment_intersection_parallel() {
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_segment_intersection_disjoint() {
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Point2::new(2.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_segment_intersection_endpoint_touch() {
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.5, 0.0),
            &Point2::new(0.5, 1.0),
        )
        .is_some());
    }

    #[test]
    fn test_intersects_segment_skips_shared_endpoints() {
        let square = unit_square();
        // A diagonal from one vertex: its endpoints sit on the polygon, so
        // the edges at those vertices are skipped, and the diagonal crosses
        // nothing else.
        assert!(!square.intersects_segment(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0)));
        // A segment slicing through two opposite edges does cross.
        assert!(square.intersects_segment(&Point2::new(-0.5, 0.5), &Point2::new(1.5, 0.5)));
    }

    #[test]
    fn test_is_simple() {
        assert!(unit_square().is_simple());

        // Bowtie: two edges cross.
        let bowtie = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!(!bowtie.is_simple());
    }
}
