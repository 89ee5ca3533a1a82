use crate::error::{OperationError, Result};
use crate::math::polygon_2d::{
    point_in_polygon, polygon_winding, signed_area_2d, PointClassification, Winding,
};
use crate::math::Point2;

/// A simple polygon stored as an implicitly closed vertex loop.
///
/// The last vertex connects back to the first; orientation is arbitrary.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    pub vertices: Vec<Point2>,
}

impl Polygon2D {
    /// Creates a polygon from its vertex loop.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// Creates a polygon from `(x, y)` pairs.
    #[must_use]
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self {
            vertices: coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    /// Axis-aligned rectangle spanning `min`..`max`, counter-clockwise.
    #[must_use]
    pub fn rectangle(min: Point2, max: Point2) -> Self {
        Self {
            vertices: vec![
                min,
                Point2::new(max.x, min.y),
                max,
                Point2::new(min.x, max.y),
            ],
        }
    }

    /// Number of vertices in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn winding(&self) -> Winding {
        polygon_winding(&self.vertices)
    }

    /// Signed area (positive for counter-clockwise loops).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Classifies `point` against this polygon, treating anything within
    /// `tolerance` of an edge as on the boundary.
    #[must_use]
    pub fn classify_point(&self, point: &Point2, tolerance: f64) -> PointClassification {
        point_in_polygon(point, &self.vertices, tolerance)
    }

    /// Returns the vertices in counter-clockwise order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the polygon has fewer than
    /// 3 vertices or encloses no area, so its winding is undefined.
    pub fn canonical_points(&self) -> Result<Vec<Point2>> {
        match self.winding() {
            Winding::CounterClockwise => Ok(self.vertices.clone()),
            Winding::Clockwise => Ok(self.vertices.iter().rev().copied().collect()),
            Winding::Degenerate => Err(OperationError::InvalidInput(format!(
                "polygon with {} vertices and area {:e} has no winding",
                self.vertices.len(),
                self.signed_area()
            ))
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn rectangle_is_counter_clockwise() {
        let r = Polygon2D::rectangle(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        assert_eq!(r.winding(), Winding::CounterClockwise);
        assert!((r.area() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn canonical_points_reverses_clockwise() {
        let cw = Polygon2D::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert_eq!(cw.winding(), Winding::Clockwise);
        let pts = cw.canonical_points().unwrap();
        assert_eq!(polygon_winding(&pts), Winding::CounterClockwise);
        assert_eq!(pts[0], Point2::new(1.0, 0.0));
    }

    #[test]
    fn canonical_points_rejects_degenerate() {
        let line = Polygon2D::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(line.canonical_points().is_err());
    }
}
