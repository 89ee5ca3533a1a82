use crate::math::Point2;

use super::edge::EdgeFlags;

/// One directed edge out of its owning vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Index of the vertex this edge points to.
    pub target: usize,
    pub flags: EdgeFlags,
}

impl Neighbor {
    #[must_use]
    pub fn new(target: usize, flags: EdgeFlags) -> Self {
        Self { target, flags }
    }
}

/// Data associated with a graph vertex.
///
/// Neighbors are kept in insertion order, not sorted by angle.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 2D position of the vertex.
    pub point: Point2,
    pub neighbors: Vec<Neighbor>,
}

impl VertexData {
    /// Creates a new isolated vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            neighbors: Vec::new(),
        }
    }

    /// Returns the record pointing at `target`, if any.
    #[must_use]
    pub fn neighbor(&self, target: usize) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.target == target)
    }

    pub(crate) fn neighbor_mut(&mut self, target: usize) -> Option<&mut Neighbor> {
        self.neighbors.iter_mut().find(|n| n.target == target)
    }
}
