mod arrangement;
mod extract;
mod normalize;
mod orientation;
mod seed;
mod select;

pub use arrangement::{Arrangement, FaceClass};
pub use extract::{extract_faces, walk_face, FaceWalk};
pub use normalize::{
    coalesce_vertices, normalize, resolve_crossings, split_edges_at_vertices, NormalizeStats,
};
pub use orientation::{clockwise_turn, FULL_TURN};
pub use seed::{seed, seed_polygon};
pub use select::{select_regions, BooleanOp2D, Region};

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Polygon2D;
use crate::math::polygon_2d::PointClassification;
use crate::math::Point2;

/// Default coincidence tolerance for vertices and vertex-edge contacts.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Tuning knobs for [`PolygonOverlay2D`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    /// Distance below which two positions, or a position and an edge, are
    /// treated as coincident.
    pub epsilon: f64,
    /// Upper bound on normalization rounds; `None` runs to the fixpoint.
    pub max_rounds: Option<usize>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_rounds: None,
        }
    }
}

impl OverlayOptions {
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            ))
            .into());
        }
        Ok(())
    }
}

/// Outcome of overlaying two polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayResult {
    /// The polygons neither touch nor contain each other.
    Disjoint,
    /// A lies strictly inside B.
    AInsideB,
    /// B lies strictly inside A.
    BInsideA,
    /// The boundaries touch or cross; the plane is split into classified faces.
    Intersecting(Arrangement),
}

impl OverlayResult {
    #[must_use]
    pub fn is_intersecting(&self) -> bool {
        matches!(self, Self::Intersecting(_))
    }

    /// The arrangement, if the polygons intersect.
    #[must_use]
    pub fn arrangement(&self) -> Option<&Arrangement> {
        match self {
            Self::Intersecting(arrangement) => Some(arrangement),
            _ => None,
        }
    }
}

/// Computes the overlay of two simple polygons.
///
/// Builds a planar graph from both boundaries, removes coincidences and
/// crossings, and walks it into an outer boundary plus faces classified as
/// A only, B only, both, or neither.
#[derive(Debug)]
pub struct PolygonOverlay2D {
    a: Polygon2D,
    b: Polygon2D,
    options: OverlayOptions,
}

impl PolygonOverlay2D {
    /// Creates a new overlay operation with default options.
    #[must_use]
    pub fn new(a: Polygon2D, b: Polygon2D) -> Self {
        Self {
            a,
            b,
            options: OverlayOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: OverlayOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the overlay.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the options are invalid or
    /// either polygon is degenerate, and `OperationError::Failed` if
    /// normalization exceeds its round limit or face extraction hits a
    /// broken invariant.
    pub fn execute(&self) -> Result<OverlayResult> {
        self.options.validate()?;

        let mut graph = seed(&self.a, &self.b)?;
        let stats = normalize(&mut graph, self.options.epsilon, self.options.max_rounds)?;
        debug!(
            merged = stats.merged,
            split = stats.split,
            crossings = stats.crossings,
            rounds = stats.rounds,
            vertices = graph.vertex_count(),
            "graph normalized"
        );

        // A change inside one polygon alone leaves two separate components:
        // the boundaries still do not meet.
        if !stats.changed() || !graph.is_connected() {
            let result = self.containment();
            debug!(?result, "boundaries do not meet");
            return Ok(result);
        }

        Ok(OverlayResult::Intersecting(extract_faces(&graph)?))
    }

    /// Executes the overlay and keeps the regions selected by `op`.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn boolean(&self, op: BooleanOp2D) -> Result<Vec<Region>> {
        let result = self.execute()?;
        let a = self.a.canonical_points()?;
        let b = self.b.canonical_points()?;
        Ok(select_regions(&result, &a, &b, op))
    }

    /// Decides nesting for boundaries that do not meet.
    fn containment(&self) -> OverlayResult {
        let eps = self.options.epsilon;
        let inside = |point: &Point2, polygon: &Polygon2D| {
            polygon.classify_point(point, eps) != PointClassification::Outside
        };

        match (self.b.vertices.first(), self.a.vertices.first()) {
            (Some(b0), _) if inside(b0, &self.a) => OverlayResult::BInsideA,
            (_, Some(a0)) if inside(a0, &self.b) => OverlayResult::AInsideB,
            _ => OverlayResult::Disjoint,
        }
    }
}

/// Overlays `a` and `b` with default options.
///
/// # Errors
///
/// See [`PolygonOverlay2D::execute`].
pub fn overlay(a: &Polygon2D, b: &Polygon2D) -> Result<OverlayResult> {
    PolygonOverlay2D::new(a.clone(), b.clone()).execute()
}
