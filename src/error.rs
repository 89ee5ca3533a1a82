use thiserror::Error;

/// Top-level error type for the planar overlay engine.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to the planar graph store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("vertex index {index} out of range (graph has {len} vertices)")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("no edge from vertex {from} to vertex {to}")]
    EdgeNotFound { from: usize, to: usize },
}

/// Errors related to overlay operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`OverlayError`].
pub type Result<T> = std::result::Result<T, OverlayError>;
