pub mod overlay;

pub use overlay::{Arrangement, BooleanOp2D, FaceClass, OverlayResult, PolygonOverlay2D};
