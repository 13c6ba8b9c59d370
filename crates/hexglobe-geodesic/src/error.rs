//! Geometry error types.
//!
//! None of these are reachable from a well-formed pipeline; they signal a
//! defect in mesh construction and abort the run.

/// Invariant violations detected while building the geodesic sphere or its dual.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeodesicError {
    /// A midpoint was requested for an edge whose endpoints are the same vertex.
    #[error("malformed midpoint key: edge ({0}, {0}) has identical endpoints")]
    DegenerateEdge(u32),

    /// A vertex index does not exist in the pool.
    #[error("vertex index {index} out of range (pool has {len} vertices)")]
    VertexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices currently in the pool.
        len: usize,
    },

    /// A vertex has too few adjacent triangles to form a dual polygon.
    #[error("vertex {vertex} has only {adjacent} adjacent faces (need at least 3)")]
    DegenerateVertex {
        /// The vertex around which the dual face was being built.
        vertex: u32,
        /// Number of triangles that reference it.
        adjacent: usize,
    },

    /// The pool outgrew the `u32` index space.
    #[error("vertex pool exceeded u32 index space")]
    PoolOverflow,
}
