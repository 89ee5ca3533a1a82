use super::distance_2d::point_to_segment_dist;
use super::{perp_dot, Point2, TOLERANCE};

/// Rotational direction of a closed vertex loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Fewer than three points or (near) zero area.
    Degenerate,
}

/// Classification of a point relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Determines the winding of a closed polygon from its signed area.
#[must_use]
pub fn polygon_winding(points: &[Point2]) -> Winding {
    let area = signed_area_2d(points);
    if points.len() < 3 || area.abs() < TOLERANCE {
        Winding::Degenerate
    } else if area > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// Classifies `point` against the closed polygon `polygon`.
///
/// Points within `tolerance` of an edge are `OnBoundary`; otherwise the
/// winding number decides (non-zero => inside).
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2], tolerance: f64) -> PointClassification {
    let n = polygon.len();
    if n < 3 {
        return PointClassification::Outside;
    }

    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        if point_to_segment_dist(point, a, b) <= tolerance {
            return PointClassification::OnBoundary;
        }
    }

    if winding_number_2d(point, polygon) == 0 {
        PointClassification::Outside
    } else {
        PointClassification::Inside
    }
}

/// Winding number of `p` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(p: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let v0 = verts[i];
        let v1 = verts[(i + 1) % n];
        let side = perp_dot(&(v1 - v0), &(p - v0));

        if v0.y <= p.y {
            if v1.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if v1.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccw_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&ccw_square());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = ccw_square();
        pts.reverse();
        let area = signed_area_2d(&pts);
        assert!((area + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn winding_detection() {
        let mut pts = ccw_square();
        assert_eq!(polygon_winding(&pts), Winding::CounterClockwise);
        pts.reverse();
        assert_eq!(polygon_winding(&pts), Winding::Clockwise);
    }

    #[test]
    fn winding_degenerate() {
        assert_eq!(polygon_winding(&[]), Winding::Degenerate);
        assert_eq!(
            polygon_winding(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]),
            Winding::Degenerate
        );
        // Collinear points enclose no area.
        let collinear = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(polygon_winding(&collinear), Winding::Degenerate);
    }

    #[test]
    fn point_in_polygon_inside_outside() {
        let sq = ccw_square();
        assert_eq!(
            point_in_polygon(&Point2::new(0.5, 0.5), &sq, TOLERANCE),
            PointClassification::Inside
        );
        assert_eq!(
            point_in_polygon(&Point2::new(1.5, 0.5), &sq, TOLERANCE),
            PointClassification::Outside
        );
    }

    #[test]
    fn point_in_polygon_ignores_orientation() {
        let mut sq = ccw_square();
        sq.reverse();
        assert_eq!(
            point_in_polygon(&Point2::new(0.25, 0.75), &sq, TOLERANCE),
            PointClassification::Inside
        );
    }

    #[test]
    fn point_in_polygon_on_boundary() {
        let sq = ccw_square();
        assert_eq!(
            point_in_polygon(&Point2::new(1.0, 0.5), &sq, TOLERANCE),
            PointClassification::OnBoundary
        );
        assert_eq!(
            point_in_polygon(&Point2::new(0.0, 0.0), &sq, TOLERANCE),
            PointClassification::OnBoundary
        );
    }

    #[test]
    fn point_in_concave_notch_is_outside() {
        // U shape: the notch between the arms is outside.
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        assert_eq!(
            point_in_polygon(&Point2::new(1.5, 2.0), &u, TOLERANCE),
            PointClassification::Outside
        );
        assert_eq!(
            point_in_polygon(&Point2::new(0.5, 2.0), &u, TOLERANCE),
            PointClassification::Inside
        );
    }
}
