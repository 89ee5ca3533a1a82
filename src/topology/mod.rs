pub mod edge;
pub mod vertex;

pub use edge::{EdgeFlags, EdgeKey};
pub use vertex::{Neighbor, VertexData};

use std::collections::{HashMap, VecDeque};

use crate::error::TopologyError;
use crate::math::Point2;

/// Dense, index-addressed arena of graph vertices.
///
/// Vertices reference each other by slot index. An index is only valid until
/// the next [`swap_delete`](Self::swap_delete): deleting a vertex moves the
/// last vertex into the freed slot, so any index held across a delete must be
/// re-resolved by the caller.
///
/// Every directed edge `u -> v` has a reverse record `v -> u`; the two may
/// carry different flags.
#[derive(Debug, Clone, Default)]
pub struct PlanarGraph {
    vertices: Vec<VertexData>,
}

impl PlanarGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), TopologyError> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(TopologyError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            })
        }
    }

    // --- Vertex operations ---

    /// Inserts an isolated vertex and returns its index.
    pub fn add_vertex(&mut self, point: Point2) -> usize {
        self.vertices.push(VertexData::new(point));
        self.vertices.len() - 1
    }

    /// Returns the vertex data, or an error if the index is out of range.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn vertex(&self, index: usize) -> Result<&VertexData, TopologyError> {
        self.check(index)?;
        Ok(&self.vertices[index])
    }

    /// Returns the position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn position(&self, index: usize) -> Result<Point2, TopologyError> {
        Ok(self.vertex(index)?.point)
    }

    /// Returns the outgoing edge records of a vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn neighbors(&self, index: usize) -> Result<&[Neighbor], TopologyError> {
        Ok(&self.vertex(index)?.neighbors)
    }

    /// Iterates over all vertex positions in index order.
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.vertices.iter().map(|v| v.point)
    }

    /// Removes a vertex by moving the last vertex into its slot.
    ///
    /// Every record still pointing at `index` is dropped first, then every
    /// record pointing at the old last index is re-pointed at `index`.
    /// Returns the old index of the relocated vertex, or `None` if `index`
    /// was the last slot. Any index equal to that old last index held by the
    /// caller is invalid afterwards.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn swap_delete(&mut self, index: usize) -> Result<Option<usize>, TopologyError> {
        self.check(index)?;
        for v in &mut self.vertices {
            v.neighbors.retain(|n| n.target != index);
        }

        let last = self.vertices.len() - 1;
        self.vertices.swap_remove(index);
        if index == last {
            return Ok(None);
        }

        for v in &mut self.vertices {
            for n in &mut v.neighbors {
                if n.target == last {
                    n.target = index;
                }
            }
        }
        Ok(Some(last))
    }

    // --- Edge operations ---

    /// Adds the directed edge `from -> to`.
    ///
    /// If `from` already has a record for `to`, `flags` is OR-ed into it
    /// instead of creating a parallel record. Self-loops are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn add_directed_edge(
        &mut self,
        from: usize,
        to: usize,
        flags: EdgeFlags,
    ) -> Result<(), TopologyError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }
        let vertex = &mut self.vertices[from];
        if let Some(existing) = vertex.neighbor_mut(to) {
            existing.flags |= flags;
        } else {
            vertex.neighbors.push(Neighbor::new(to, flags));
        }
        Ok(())
    }

    /// Adds both directions of the edge `u <-> v`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn add_edge(
        &mut self,
        u: usize,
        v: usize,
        forward: EdgeFlags,
        backward: EdgeFlags,
    ) -> Result<(), TopologyError> {
        self.add_directed_edge(u, v, forward)?;
        self.add_directed_edge(v, u, backward)
    }

    /// Removes the record `vertex -> target` and returns its flags.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotFound` if no such record exists.
    pub fn remove_neighbor(
        &mut self,
        vertex: usize,
        target: usize,
    ) -> Result<EdgeFlags, TopologyError> {
        self.check(vertex)?;
        let neighbors = &mut self.vertices[vertex].neighbors;
        let pos = neighbors
            .iter()
            .position(|n| n.target == target)
            .ok_or(TopologyError::EdgeNotFound {
                from: vertex,
                to: target,
            })?;
        Ok(neighbors.remove(pos).flags)
    }

    /// Removes both directions of `u <-> v`, returning `(flags(u->v), flags(v->u))`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotFound` if either record is missing.
    pub fn remove_edge(
        &mut self,
        u: usize,
        v: usize,
    ) -> Result<(EdgeFlags, EdgeFlags), TopologyError> {
        let forward = self.remove_neighbor(u, v)?;
        let backward = self.remove_neighbor(v, u)?;
        Ok((forward, backward))
    }

    /// Re-points the record `vertex -> old` at `new`.
    ///
    /// Merges into an existing record for `new` and drops the record when it
    /// would become a self-loop.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotFound` if `vertex` has no record for `old`.
    pub fn retarget_neighbor(
        &mut self,
        vertex: usize,
        old: usize,
        new: usize,
    ) -> Result<(), TopologyError> {
        self.check(vertex)?;
        self.check(new)?;
        let data = &mut self.vertices[vertex];
        let pos = data
            .neighbors
            .iter()
            .position(|n| n.target == old)
            .ok_or(TopologyError::EdgeNotFound {
                from: vertex,
                to: old,
            })?;
        let record = data.neighbors.remove(pos);
        if new == vertex {
            return Ok(());
        }
        if let Some(existing) = data.neighbor_mut(new) {
            existing.flags |= record.flags;
        } else {
            data.neighbors.insert(pos, Neighbor::new(new, record.flags));
        }
        Ok(())
    }

    // --- Queries ---

    /// Flags of the directed edge `from -> to`, if present.
    #[must_use]
    pub fn flags(&self, from: usize, to: usize) -> Option<EdgeFlags> {
        self.vertices
            .get(from)
            .and_then(|v| v.neighbor(to))
            .map(|n| n.flags)
    }

    /// Total number of directed edge records.
    #[must_use]
    pub fn directed_edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.neighbors.len()).sum()
    }

    /// Every undirected edge once, keyed canonically.
    #[must_use]
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        let mut keys = Vec::new();
        for (u, v) in self.vertices.iter().enumerate() {
            for n in &v.neighbors {
                if u < n.target {
                    keys.push(EdgeKey::new(u, n.target));
                }
            }
        }
        keys
    }

    /// Returns true if every record `u -> v` has a reverse record `v -> u`.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.vertices.iter().enumerate().all(|(u, v)| {
            v.neighbors
                .iter()
                .all(|n| self.flags(n.target, u).is_some())
        })
    }

    /// Returns true if every vertex is reachable from vertex 0.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    /// Vertex indices of every connected component, each sorted ascending,
    /// ordered by their lowest index.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.vertices.len()];
        let mut components = Vec::new();
        for root in 0..self.vertices.len() {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            let mut component = vec![root];
            let mut queue = VecDeque::from([root]);
            while let Some(u) = queue.pop_front() {
                for n in &self.vertices[u].neighbors {
                    if !seen[n.target] {
                        seen[n.target] = true;
                        component.push(n.target);
                        queue.push_back(n.target);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Copies the vertices in `indices`, and every record between two of
    /// them, into a new graph. Vertex `indices[k]` becomes vertex `k`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexOutOfRange` for an invalid index.
    pub fn subgraph(&self, indices: &[usize]) -> Result<PlanarGraph, TopologyError> {
        let mut remap = HashMap::with_capacity(indices.len());
        let mut graph = PlanarGraph::new();
        for &i in indices {
            let k = graph.add_vertex(self.position(i)?);
            remap.insert(i, k);
        }
        for (k, &i) in indices.iter().enumerate() {
            for n in self.neighbors(i)? {
                if let Some(&target) = remap.get(&n.target) {
                    graph.add_directed_edge(k, target, n.flags)?;
                }
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triangle() -> PlanarGraph {
        let mut g = PlanarGraph::new();
        let a = g.add_vertex(Point2::new(0.0, 0.0));
        let b = g.add_vertex(Point2::new(1.0, 0.0));
        let c = g.add_vertex(Point2::new(0.0, 1.0));
        g.add_edge(a, b, EdgeFlags::INSIDE_A, EdgeFlags::NONE).unwrap();
        g.add_edge(b, c, EdgeFlags::INSIDE_A, EdgeFlags::NONE).unwrap();
        g.add_edge(c, a, EdgeFlags::INSIDE_A, EdgeFlags::NONE).unwrap();
        g
    }

    #[test]
    fn add_edge_is_symmetric_with_asymmetric_flags() {
        let g = triangle();
        assert!(g.is_symmetric());
        assert_eq!(g.directed_edge_count(), 6);
        assert_eq!(g.flags(0, 1), Some(EdgeFlags::INSIDE_A));
        assert_eq!(g.flags(1, 0), Some(EdgeFlags::NONE));
        assert_eq!(g.edge_keys().len(), 3);
    }

    #[test]
    fn add_directed_edge_merges_duplicates() {
        let mut g = triangle();
        g.add_directed_edge(1, 0, EdgeFlags::INSIDE_B).unwrap();
        assert_eq!(g.neighbors(1).unwrap().len(), 2);
        assert_eq!(g.flags(1, 0), Some(EdgeFlags::INSIDE_B));
        g.add_directed_edge(0, 1, EdgeFlags::INSIDE_B).unwrap();
        assert_eq!(g.flags(0, 1), Some(EdgeFlags::INSIDE_BOTH));
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut g = triangle();
        g.add_directed_edge(2, 2, EdgeFlags::INSIDE_A).unwrap();
        assert!(g.flags(2, 2).is_none());
    }

    #[test]
    fn remove_neighbor_returns_flags() {
        let mut g = triangle();
        let (fwd, back) = g.remove_edge(0, 1).unwrap();
        assert_eq!(fwd, EdgeFlags::INSIDE_A);
        assert_eq!(back, EdgeFlags::NONE);
        assert!(g.is_symmetric());
        assert!(matches!(
            g.remove_neighbor(0, 1),
            Err(TopologyError::EdgeNotFound { from: 0, to: 1 })
        ));
    }

    #[test]
    fn retarget_merges_and_drops_self_loops() {
        let mut g = triangle();
        // 0 -> 2 re-pointed at 1 merges into the existing 0 -> 1 record.
        g.retarget_neighbor(0, 2, 1).unwrap();
        assert_eq!(g.neighbors(0).unwrap().len(), 1);
        assert_eq!(g.flags(0, 1), Some(EdgeFlags::INSIDE_A));
        // 1 -> 0 re-pointed at 1 would be a self-loop and is dropped.
        g.retarget_neighbor(1, 0, 1).unwrap();
        assert!(g.flags(1, 0).is_none());
    }

    #[test]
    fn swap_delete_relocates_last_vertex() {
        let mut g = triangle();
        let moved = g.swap_delete(0).unwrap();
        assert_eq!(moved, Some(2));
        assert_eq!(g.vertex_count(), 2);
        // Old vertex 2 (0, 1) now lives in slot 0.
        assert_eq!(g.position(0).unwrap(), Point2::new(0.0, 1.0));
        // Only the 1 <-> 2 edge survives, now 1 <-> 0.
        assert_eq!(g.flags(1, 0), Some(EdgeFlags::INSIDE_A));
        assert_eq!(g.flags(0, 1), Some(EdgeFlags::NONE));
        assert!(g.is_symmetric());
        assert_eq!(g.directed_edge_count(), 2);
    }

    #[test]
    fn swap_delete_last_slot() {
        let mut g = triangle();
        assert_eq!(g.swap_delete(2).unwrap(), None);
        assert_eq!(g.directed_edge_count(), 2);
        assert!(g.is_symmetric());
    }

    #[test]
    fn out_of_range_is_reported() {
        let mut g = triangle();
        assert!(matches!(
            g.position(7),
            Err(TopologyError::VertexOutOfRange { index: 7, len: 3 })
        ));
        assert!(g.add_directed_edge(0, 9, EdgeFlags::NONE).is_err());
        assert!(g.swap_delete(3).is_err());
    }

    #[test]
    fn connectivity() {
        let mut g = triangle();
        assert!(g.is_connected());
        g.add_vertex(Point2::new(5.0, 5.0));
        assert!(!g.is_connected());
        assert!(PlanarGraph::new().is_connected());
    }

    #[test]
    fn components_and_subgraph() {
        let mut g = triangle();
        let d = g.add_vertex(Point2::new(5.0, 5.0));
        let e = g.add_vertex(Point2::new(6.0, 5.0));
        g.add_edge(d, e, EdgeFlags::INSIDE_B, EdgeFlags::NONE).unwrap();

        let components = g.components();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4]]);

        let sub = g.subgraph(&components[1]).unwrap();
        assert_eq!(sub.vertex_count(), 2);
        assert_eq!(sub.position(0).unwrap(), Point2::new(5.0, 5.0));
        assert_eq!(sub.flags(0, 1), Some(EdgeFlags::INSIDE_B));
        assert_eq!(sub.flags(1, 0), Some(EdgeFlags::NONE));
        assert!(sub.is_connected());

        // Records leaving the selection are not copied.
        let partial = g.subgraph(&[2, 0]).unwrap();
        assert_eq!(partial.flags(0, 1), Some(EdgeFlags::INSIDE_A));
        assert_eq!(partial.flags(1, 0), Some(EdgeFlags::NONE));
        assert_eq!(partial.directed_edge_count(), 2);
        assert!(g.subgraph(&[9]).is_err());
    }
}
