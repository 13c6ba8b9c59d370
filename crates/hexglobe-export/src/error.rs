//! Export error types.

use std::path::PathBuf;

/// Errors that can occur while validating, encoding, or writing a model.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A buffer's byte length is not a whole number of elements.
    #[error("{buffer} buffer is {len} bytes, not a multiple of the {stride}-byte element size")]
    Misaligned {
        /// Which buffer (`positions`, `indices` or `colors`).
        buffer: &'static str,
        /// Actual byte length.
        len: usize,
        /// Required element size in bytes.
        stride: usize,
    },

    /// A buffer's byte length does not match the declared element count.
    #[error("{buffer} buffer length {actual} does not match expected length {expected}")]
    BufferLength {
        /// Which buffer (`positions`, `indices` or `colors`).
        buffer: &'static str,
        /// Byte length implied by the vertex/index counts.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// The index count does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    /// An index points past the end of the vertex buffer.
    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices in the position buffer.
        vertex_count: usize,
    },

    /// A vertex index would not fit in `u32`.
    #[error("vertex index {0} exceeds the u32 index range")]
    VertexLimit(usize),

    /// The mesh has no vertices or no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// The container would exceed the 4 GiB GLB size limit.
    #[error("GLB container of {0} bytes exceeds the u32 length field")]
    TooLarge(usize),

    /// Failed to serialize the glTF JSON document.
    #[error("failed to serialize glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
