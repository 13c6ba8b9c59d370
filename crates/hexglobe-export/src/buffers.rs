//! Flat vertex/index/color buffers for a single mesh primitive.

use std::path::Path;

use crate::{ExportError, encode_glb, export_glb};

/// Flat, GPU-style buffers for one triangle mesh.
///
/// `positions` and `colors` hold 3 floats per vertex in the same order;
/// `indices` holds 3 zero-based vertex indices per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
    /// Linear `r, g, b` in `[0, 1]` per vertex.
    pub colors: Vec<f32>,
}

impl MeshBuffers {
    /// Create empty buffers with room for `vertices` vertices and `triangles` triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(triangles * 3),
            colors: Vec::with_capacity(vertices * 3),
        }
    }

    /// Number of vertices described by the position buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append one vertex and return its index within these buffers.
    ///
    /// Fails once the buffers already hold as many vertices as `u32` indices
    /// can address.
    pub fn push_vertex(
        &mut self,
        position: [f32; 3],
        color: [f32; 3],
    ) -> Result<u32, ExportError> {
        let index = vertex_index(self.vertex_count())?;
        self.positions.extend_from_slice(&position);
        self.colors.extend_from_slice(&color);
        Ok(index)
    }

    /// Append another mesh, offsetting its indices by this mesh's vertex count.
    ///
    /// Nothing is appended if an offset index would overflow `u32`.
    pub fn append(&mut self, other: MeshBuffers) -> Result<(), ExportError> {
        let base = vertex_index(self.vertex_count())?;
        let indices = other
            .indices
            .iter()
            .map(|&i| {
                i.checked_add(base)
                    .ok_or(ExportError::VertexLimit(i as usize + base as usize))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        self.positions.extend(other.positions);
        self.colors.extend(other.colors);
        self.indices.extend(indices);
        Ok(())
    }

    /// Encode as an in-memory GLB container.
    ///
    /// glTF buffers are little-endian; like GPU uploads, the raw float and
    /// index bytes are taken directly from host memory.
    pub fn encode_glb(&self) -> Result<Vec<u8>, ExportError> {
        encode_glb(
            bytemuck::cast_slice(&self.positions),
            bytemuck::cast_slice(&self.indices),
            bytemuck::cast_slice(&self.colors),
            self.vertex_count(),
            self.indices.len(),
        )
    }

    /// Encode and write to `path`.
    pub fn export_glb(&self, path: &Path) -> Result<(), ExportError> {
        export_glb(
            path,
            bytemuck::cast_slice(&self.positions),
            bytemuck::cast_slice(&self.indices),
            bytemuck::cast_slice(&self.colors),
            self.vertex_count(),
            self.indices.len(),
        )
    }
}

/// `count` as the index of the next vertex.
fn vertex_index(count: usize) -> Result<u32, ExportError> {
    u32::try_from(count).map_err(|_| ExportError::VertexLimit(count))
}
