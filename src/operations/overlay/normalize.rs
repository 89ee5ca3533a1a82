use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::math::distance_2d::closest_point_on_segment;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;
use crate::topology::{EdgeKey, PlanarGraph};

/// What a normalization run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Vertex pairs coalesced.
    pub merged: usize,
    /// Edges split at a vertex lying on them.
    pub split: usize,
    /// Edge crossings replaced by a new vertex.
    pub crossings: usize,
    /// Rounds run, including the final round that changed nothing.
    pub rounds: usize,
}

impl NormalizeStats {
    /// Returns true if any merge or split happened.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.merged + self.split + self.crossings > 0
    }
}

/// Turns `graph` into a planar straight-line graph.
///
/// Runs coalescing, point-on-edge splitting and crossing resolution in that
/// order, repeating the three passes until a whole round changes nothing.
/// Vertex indices held by the caller are invalid afterwards.
///
/// # Errors
///
/// Returns `OperationError::Failed` if `max_rounds` is reached before the
/// fixpoint, or a topology error if the graph is internally inconsistent.
pub fn normalize(
    graph: &mut PlanarGraph,
    epsilon: f64,
    max_rounds: Option<usize>,
) -> Result<NormalizeStats> {
    let mut stats = NormalizeStats::default();
    loop {
        if max_rounds.is_some_and(|max| stats.rounds >= max) {
            return Err(OperationError::Failed(format!(
                "normalization did not reach a fixpoint within {} rounds",
                stats.rounds
            ))
            .into());
        }
        stats.rounds += 1;

        let merged = coalesce_vertices(graph, epsilon)?;
        let split = split_edges_at_vertices(graph, epsilon)?;
        let crossings = resolve_crossings(graph, epsilon)?;
        debug!(
            round = stats.rounds,
            merged,
            split,
            crossings,
            vertices = graph.vertex_count(),
            "normalization round"
        );

        stats.merged += merged;
        stats.split += split;
        stats.crossings += crossings;
        if merged + split + crossings == 0 {
            return Ok(stats);
        }
    }
}

/// Merges every pair of vertices closer than `epsilon`.
///
/// The higher-indexed vertex of a pair is folded into the lower one and then
/// swap-deleted. Returns the number of merges.
///
/// # Errors
///
/// Returns a topology error if the graph is internally inconsistent.
pub fn coalesce_vertices(graph: &mut PlanarGraph, epsilon: f64) -> Result<usize> {
    let mut merged = 0;
    let mut i = 0;
    while i < graph.vertex_count() {
        let pi = graph.position(i)?;
        let mut close = None;
        for j in (i + 1)..graph.vertex_count() {
            if nalgebra::distance(&pi, &graph.position(j)?) < epsilon {
                close = Some(j);
                break;
            }
        }
        // Pairs below `i` were checked already and positions never move, so
        // only `i` itself needs another scan after a merge.
        match close {
            Some(j) => {
                merge_vertex(graph, i, j)?;
                merged += 1;
            }
            None => i += 1,
        }
    }
    Ok(merged)
}

/// Folds `drop` into `keep` and swap-deletes `drop`.
fn merge_vertex(graph: &mut PlanarGraph, keep: usize, drop: usize) -> Result<()> {
    trace!(keep, drop, "coalescing vertices");

    let outgoing = graph.neighbors(drop)?.to_vec();
    for record in &outgoing {
        graph.add_directed_edge(keep, record.target, record.flags)?;
    }

    for w in 0..graph.vertex_count() {
        if w != drop && graph.flags(w, drop).is_some() {
            graph.retarget_neighbor(w, drop, keep)?;
        }
    }

    graph.swap_delete(drop)?;
    Ok(())
}

/// Splits every edge that passes within `epsilon` of a vertex it is not
/// incident to. Returns the number of splits.
///
/// A vertex is rescanned after each split, so a vertex touching several
/// edges splits all of them.
///
/// # Errors
///
/// Returns a topology error if the graph is internally inconsistent.
pub fn split_edges_at_vertices(graph: &mut PlanarGraph, epsilon: f64) -> Result<usize> {
    let mut splits = 0;
    let mut p = 0;
    while p < graph.vertex_count() {
        match find_edge_through(graph, p, epsilon)? {
            Some(key) => {
                trace!(vertex = p, lo = key.lo, hi = key.hi, "splitting edge at vertex");
                split_edge(graph, key.lo, key.hi, p)?;
                splits += 1;
            }
            None => p += 1,
        }
    }
    Ok(splits)
}

fn find_edge_through(graph: &PlanarGraph, p: usize, epsilon: f64) -> Result<Option<EdgeKey>> {
    let point = graph.position(p)?;
    for key in graph.edge_keys() {
        if key.lo == p || key.hi == p {
            continue;
        }
        let a = graph.position(key.lo)?;
        let b = graph.position(key.hi)?;
        let closest = closest_point_on_segment(&point, &a, &b);
        if nalgebra::distance(&point, &closest) < epsilon {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

/// Replaces edge `u <-> v` by `u <-> mid <-> v`, keeping each direction's flags.
fn split_edge(graph: &mut PlanarGraph, u: usize, v: usize, mid: usize) -> Result<()> {
    let (forward, backward) = graph.remove_edge(u, v)?;
    graph.add_edge(u, mid, forward, backward)?;
    graph.add_edge(mid, v, forward, backward)?;
    Ok(())
}

/// A proper crossing between edges `a` and `b`.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    a: (usize, usize),
    b: (usize, usize),
    point: Point2,
}

/// Splits every pair of properly crossing edges at their crossing point.
/// Returns the number of crossings resolved.
///
/// Crossings closer than `epsilon` to one of the four endpoints are left to
/// coalescing and point-on-edge splitting.
///
/// # Errors
///
/// Returns a topology error if the graph is internally inconsistent.
pub fn resolve_crossings(graph: &mut PlanarGraph, epsilon: f64) -> Result<usize> {
    let mut resolved = 0;
    let mut tested: HashSet<(EdgeKey, EdgeKey)> = HashSet::new();

    let mut v0 = 0;
    while v0 < graph.vertex_count() {
        let mut v1 = v0 + 1;
        while v1 < graph.vertex_count() {
            tested.clear();
            // A split can expose another crossing between the same two
            // vertices, so rescan the pair until it comes up clean.
            while let Some(crossing) = find_crossing(graph, v0, v1, epsilon, &mut tested)? {
                let x = graph.add_vertex(crossing.point);
                trace!(
                    a = ?crossing.a,
                    b = ?crossing.b,
                    vertex = x,
                    x = crossing.point.x,
                    y = crossing.point.y,
                    "resolving edge crossing"
                );
                split_edge(graph, crossing.a.0, crossing.a.1, x)?;
                split_edge(graph, crossing.b.0, crossing.b.1, x)?;
                resolved += 1;
            }
            v1 += 1;
        }
        v0 += 1;
    }
    Ok(resolved)
}

fn find_crossing(
    graph: &PlanarGraph,
    v0: usize,
    v1: usize,
    epsilon: f64,
    tested: &mut HashSet<(EdgeKey, EdgeKey)>,
) -> Result<Option<Crossing>> {
    let p0 = graph.position(v0)?;
    let p1 = graph.position(v1)?;

    for n0 in graph.neighbors(v0)? {
        let ka = EdgeKey::new(v0, n0.target);
        for n1 in graph.neighbors(v1)? {
            let kb = EdgeKey::new(v1, n1.target);
            if ka.shares_endpoint(&kb) {
                continue;
            }
            let pair = if ka <= kb { (ka, kb) } else { (kb, ka) };
            if !tested.insert(pair) {
                continue;
            }

            let q0 = graph.position(n0.target)?;
            let q1 = graph.position(n1.target)?;
            let Some((point, _, _)) = segment_segment_intersect_2d(&p0, &q0, &p1, &q1) else {
                continue;
            };
            let near_endpoint = [p0, q0, p1, q1]
                .iter()
                .any(|e| nalgebra::distance(e, &point) < epsilon);
            if near_endpoint {
                continue;
            }

            return Ok(Some(Crossing {
                a: (v0, n0.target),
                b: (v1, n1.target),
                point,
            }));
        }
    }
    Ok(None)
}
