use crate::error::Result;
use crate::geometry::Polygon2D;
use crate::math::Point2;
use crate::topology::{EdgeFlags, PlanarGraph};

/// Builds the initial graph from the two input polygons.
///
/// Each polygon becomes a disjoint vertex cycle walked counter-clockwise;
/// the counter-clockwise direction of A's edges carries `INSIDE_A`, B's
/// carries `INSIDE_B`, and the reverse directions carry no flag.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if either polygon has no winding
/// (fewer than 3 vertices or zero area). Both windings are resolved before
/// the graph is touched, so a failure never leaves a partial graph.
pub fn seed(a: &Polygon2D, b: &Polygon2D) -> Result<PlanarGraph> {
    let loop_a = a.canonical_points()?;
    let loop_b = b.canonical_points()?;

    let mut graph = PlanarGraph::new();
    insert_loop(&mut graph, &loop_a, EdgeFlags::INSIDE_A)?;
    insert_loop(&mut graph, &loop_b, EdgeFlags::INSIDE_B)?;
    Ok(graph)
}

/// Appends a single polygon to `graph` as a counter-clockwise cycle tagged
/// with `flags`.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if the polygon has no winding.
pub fn seed_polygon(graph: &mut PlanarGraph, polygon: &Polygon2D, flags: EdgeFlags) -> Result<()> {
    let points = polygon.canonical_points()?;
    insert_loop(graph, &points, flags)
}

fn insert_loop(graph: &mut PlanarGraph, points: &[Point2], flags: EdgeFlags) -> Result<()> {
    let base = graph.vertex_count();
    let n = points.len();
    for p in points {
        graph.add_vertex(*p);
    }
    for i in 0..n {
        let v = base + i;
        let prev = base + (i + n - 1) % n;
        let next = base + (i + 1) % n;
        graph.add_directed_edge(v, prev, EdgeFlags::NONE)?;
        graph.add_directed_edge(v, next, flags)?;
    }
    Ok(())
}
