pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{OverlayError, Result};
pub use geometry::Polygon2D;
pub use operations::overlay::{overlay, OverlayOptions, OverlayResult, PolygonOverlay2D};
