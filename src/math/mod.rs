pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Perpendicular dot product (`a.x * b.y - a.y * b.x`).
///
/// Positive when `b` is counter-clockwise of `a`.
#[must_use]
pub fn perp_dot(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
