//! Recursive 1-to-4 triangle subdivision of the icosahedron.

use std::time::Instant;

use tracing::{debug, info};

use crate::{GeodesicError, Triangle, VertexPool, generate_icosahedron};

/// A subdivided icosahedron: the vertex pool plus its final triangle list.
#[derive(Clone, Debug)]
pub struct GeodesicSphere {
    /// All vertices, read-only once construction finishes.
    pub pool: VertexPool,
    /// Triangles referencing `pool`.
    pub faces: Vec<Triangle>,
    /// Number of subdivision rounds applied.
    pub frequency: u32,
}

impl GeodesicSphere {
    /// Subdivide the base icosahedron `frequency` times.
    ///
    /// Frequency 0 yields the plain icosahedron; frequency 5 yields 20480
    /// triangles over 10242 vertices.
    pub fn new(frequency: u32) -> Result<Self, GeodesicError> {
        let start = Instant::now();
        info!(frequency, "Creating geodesic sphere");

        let (mut pool, mut faces) = generate_icosahedron();
        for round in 0..frequency {
            faces = subdivide(&mut pool, &faces)?;
            debug!(
                step = round + 1,
                of = frequency,
                faces = faces.len(),
                vertices = pool.len(),
                "Subdivision step complete"
            );
        }
        pool.clear_midpoint_cache();

        info!(
            faces = faces.len(),
            vertices = pool.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Geodesic sphere created"
        );
        Ok(Self {
            pool,
            faces,
            frequency,
        })
    }
}

/// Split every triangle into 4 by inserting normalized edge midpoints.
///
/// `(v1, v2, v3)` becomes `(v1, m12, m31)`, `(v2, m23, m12)`, `(v3, m31, m23)`
/// and `(m12, m23, m31)`, preserving the input winding. Midpoints go through
/// [`VertexPool::add_or_get_midpoint`], so shared edges share their new vertex.
pub fn subdivide(
    pool: &mut VertexPool,
    faces: &[Triangle],
) -> Result<Vec<Triangle>, GeodesicError> {
    let mut new_faces = Vec::with_capacity(faces.len() * 4);

    for &[v1, v2, v3] in faces {
        let m12 = pool.add_or_get_midpoint(v1, v2)?;
        let m23 = pool.add_or_get_midpoint(v2, v3)?;
        let m31 = pool.add_or_get_midpoint(v3, v1)?;

        new_faces.extend_from_slice(&[
            [v1, m12, m31],
            [v2, m23, m12],
            [v3, m31, m23],
            [m12, m23, m31],
        ]);
    }

    Ok(new_faces)
}

/// Triangle count after `frequency` rounds: `20 · 4^frequency`.
///
/// `None` when the count does not fit in a `u64` (frequency 30 and up).
pub fn expected_triangle_count(frequency: u32) -> Option<u64> {
    4u64.checked_pow(frequency)?.checked_mul(20)
}

/// Vertex count after `frequency` rounds: `10 · 4^frequency + 2`.
///
/// `None` when the count does not fit in a `u64`.
pub fn expected_vertex_count(frequency: u32) -> Option<u64> {
    4u64.checked_pow(frequency)?.checked_mul(10)?.checked_add(2)
}
