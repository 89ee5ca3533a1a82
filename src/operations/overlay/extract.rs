use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{OperationError, Result, TopologyError};
use crate::math::Vector2;
use crate::topology::{EdgeFlags, PlanarGraph};

use super::arrangement::Arrangement;
use super::orientation::{clockwise_turn, FULL_TURN};

/// One closed walk through the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceWalk {
    /// Visited vertices, starting vertex first, not repeated at the end.
    pub vertices: Vec<usize>,
    /// OR of the flags of every directed edge traversed.
    pub flags: EdgeFlags,
}

/// Walks a planar graph into its outer boundary and classified faces.
///
/// The graph must be normalized (no crossings, no coincident vertices) and
/// connected. Every directed edge is traversed by exactly one walk.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the graph has fewer than 3 vertices
/// or more than one component, a walk produces fewer than 3 vertices, or a directed edge would be
/// traversed twice (the graph is not planar).
pub fn extract_faces(graph: &PlanarGraph) -> Result<Arrangement> {
    if graph.vertex_count() < 3 {
        return Err(OperationError::Failed(format!(
            "cannot extract faces from a graph with {} vertices",
            graph.vertex_count()
        ))
        .into());
    }
    // The outer ring of a second component would be walked as a bounded face.
    let components = graph.components().len();
    if components > 1 {
        return Err(OperationError::Failed(format!(
            "cannot extract faces from a graph with {components} components"
        ))
        .into());
    }

    let mut emitted: HashSet<(usize, usize)> = HashSet::with_capacity(graph.directed_edge_count());

    // The lowest vertex is on the outer boundary. Pretend we arrived there
    // heading along +x, so the reference direction is -x.
    let start = lowest_vertex(graph)?;
    let first = next_vertex(graph, start, &Vector2::new(-1.0, 0.0), None)?;
    let boundary = walk_face(graph, start, first, &mut emitted)?;
    if boundary.vertices.len() < 3 {
        return Err(OperationError::Failed(format!(
            "outer boundary has only {} vertices",
            boundary.vertices.len()
        ))
        .into());
    }
    trace!(start, len = boundary.vertices.len(), "outer boundary");

    let mut arrangement = Arrangement::new(graph.points().collect(), boundary.vertices);

    for u in 0..graph.vertex_count() {
        for neighbor in graph.neighbors(u)? {
            if emitted.contains(&(u, neighbor.target)) {
                continue;
            }
            let face = walk_face(graph, u, neighbor.target, &mut emitted)?;
            if face.vertices.len() < 3 {
                return Err(OperationError::Failed(format!(
                    "face starting at edge {u}->{} has only {} vertices",
                    neighbor.target,
                    face.vertices.len()
                ))
                .into());
            }
            trace!(start = u, len = face.vertices.len(), flags = %face.flags, "face");
            arrangement.push_face(face.vertices, face.flags);
        }
    }

    debug!(
        boundary = arrangement.boundary.len(),
        a_only = arrangement.a_only.len(),
        b_only = arrangement.b_only.len(),
        intersection = arrangement.intersection.len(),
        holes = arrangement.holes.len(),
        "faces extracted"
    );
    Ok(arrangement)
}

/// Follows the face to the left of the directed edge `start_from -> start_to`
/// until the walk is about to repeat that edge.
///
/// Every traversed directed edge is recorded in `emitted`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the walk reaches an edge that was
/// already emitted, or a topology error if an edge is missing.
pub fn walk_face(
    graph: &PlanarGraph,
    start_from: usize,
    start_to: usize,
    emitted: &mut HashSet<(usize, usize)>,
) -> Result<FaceWalk> {
    let mut vertices = Vec::new();
    let mut flags = EdgeFlags::NONE;
    let (mut from, mut to) = (start_from, start_to);

    loop {
        if !emitted.insert((from, to)) {
            return Err(OperationError::Failed(format!(
                "directed edge {from}->{to} reached twice while walking from {start_from}->{start_to}"
            ))
            .into());
        }
        flags |= graph
            .flags(from, to)
            .ok_or(TopologyError::EdgeNotFound { from, to })?;
        vertices.push(from);

        let reference = graph.position(from)? - graph.position(to)?;
        let next = next_vertex(graph, to, &reference, Some(from))?;
        if (to, next) == (start_from, start_to) {
            break;
        }
        from = to;
        to = next;
    }

    Ok(FaceWalk { vertices, flags })
}

/// Picks the outgoing edge of `at` with the smallest clockwise turn from
/// `reference`. The edge back to `came_from` is only taken at a dead end.
fn next_vertex(
    graph: &PlanarGraph,
    at: usize,
    reference: &Vector2,
    came_from: Option<usize>,
) -> Result<usize> {
    let origin = graph.position(at)?;
    let mut best: Option<(usize, f64)> = None;

    for neighbor in graph.neighbors(at)? {
        let turn = if came_from == Some(neighbor.target) {
            FULL_TURN
        } else {
            let dir = graph.position(neighbor.target)? - origin;
            clockwise_turn(reference, &dir)
        };
        if best.is_none_or(|(_, b)| turn < b) {
            best = Some((neighbor.target, turn));
        }
    }

    best.map(|(target, _)| target).ok_or_else(|| {
        OperationError::Failed(format!("vertex {at} has no outgoing edge")).into()
    })
}

/// Index of the vertex with the lowest y, then lowest x.
fn lowest_vertex(graph: &PlanarGraph) -> Result<usize> {
    graph
        .points()
        .enumerate()
        .min_by(|(_, p), (_, q)| p.y.total_cmp(&q.y).then(p.x.total_cmp(&q.x)))
        .map(|(i, _)| i)
        .ok_or_else(|| OperationError::Failed("graph has no vertices".into()).into())
}
