//! Goldberg dual of a geodesic sphere: one polygon per sphere vertex.

use std::time::Instant;

use glam::DVec3;
use tracing::info;

use crate::{GeodesicError, GeodesicSphere, Triangle, VertexPool, order_polygon, polygon_centroid};

/// Shape of a dual face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Five sides, found at the 12 original icosahedron vertices.
    Pentagon,
    /// Six sides, everywhere else.
    Hexagon,
    /// Any other side count. Never produced from a valid geodesic sphere.
    Other(usize),
}

/// One polygon of the dual mesh, with points wound counter-clockwise about
/// the outward normal.
#[derive(Clone, Debug, PartialEq)]
pub struct DualFace {
    /// Ordered polygon corners (renormalized triangle centroids).
    pub points: Vec<DVec3>,
}

impl DualFace {
    /// Number of corners.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the face has no corners.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pentagon, hexagon or other.
    pub fn kind(&self) -> FaceKind {
        match self.points.len() {
            5 => FaceKind::Pentagon,
            6 => FaceKind::Hexagon,
            n => FaceKind::Other(n),
        }
    }

    /// Mean of the corners (inside the sphere, not renormalized).
    pub fn centroid(&self) -> DVec3 {
        polygon_centroid(&self.points)
    }

    /// Outward unit normal, the centroid's direction from the origin.
    pub fn normal(&self) -> DVec3 {
        self.centroid().normalize()
    }
}

/// Pentagon/hexagon tally of a dual mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCensus {
    /// Number of five-sided faces.
    pub pentagons: usize,
    /// Number of six-sided faces.
    pub hexagons: usize,
    /// Faces with any other side count.
    pub other: usize,
}

/// The Goldberg polyhedron: `faces[v]` is the dual face around sphere vertex `v`.
#[derive(Clone, Debug)]
pub struct DualMesh {
    /// Dual faces in sphere-vertex order.
    pub faces: Vec<DualFace>,
}

impl DualMesh {
    /// Count faces by kind.
    pub fn census(&self) -> FaceCensus {
        let mut census = FaceCensus::default();
        for face in &self.faces {
            match face.kind() {
                FaceKind::Pentagon => census.pentagons += 1,
                FaceKind::Hexagon => census.hexagons += 1,
                FaceKind::Other(_) => census.other += 1,
            }
        }
        census
    }

    /// Total number of triangles a fan triangulation of every face produces.
    pub fn fan_triangle_count(&self) -> usize {
        self.faces.iter().map(DualFace::len).sum()
    }

    /// Number of dual faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl TryFrom<&GeodesicSphere> for DualMesh {
    type Error = GeodesicError;

    fn try_from(sphere: &GeodesicSphere) -> Result<Self, Self::Error> {
        build_dual(&sphere.pool, &sphere.faces)
    }
}

/// Build the dual polyhedron of a triangulated sphere.
///
/// For each vertex, the centroids of its adjacent triangles are pushed back
/// onto the unit sphere and ordered counter-clockwise around the vertex.
pub fn build_dual(pool: &VertexPool, faces: &[Triangle]) -> Result<DualMesh, GeodesicError> {
    let start = Instant::now();
    info!(vertices = pool.len(), "Computing dual polyhedron");

    let adjacency = vertex_faces(pool.len(), faces)?;
    let vertices = pool.vertices();

    let mut dual_faces = Vec::with_capacity(vertices.len());
    for (v_idx, adjacent) in adjacency.iter().enumerate() {
        if adjacent.len() < 3 {
            return Err(GeodesicError::DegenerateVertex {
                vertex: v_idx as u32,
                adjacent: adjacent.len(),
            });
        }

        let centroids: Vec<DVec3> = adjacent
            .iter()
            .map(|&f_idx| {
                let [a, b, c] = faces[f_idx as usize];
                let sum = vertices[a as usize] + vertices[b as usize] + vertices[c as usize];
                (sum / 3.0).normalize()
            })
            .collect();

        dual_faces.push(DualFace {
            points: order_polygon(centroids, vertices[v_idx]),
        });
    }

    let mesh = DualMesh { faces: dual_faces };
    info!(
        faces = mesh.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Dual polyhedron computed"
    );
    Ok(mesh)
}

/// Per-vertex lists of the triangles that reference each vertex, built in one pass.
fn vertex_faces(vertex_count: usize, faces: &[Triangle]) -> Result<Vec<Vec<u32>>, GeodesicError> {
    // Interior vertices of a geodesic sphere touch six triangles.
    let mut adjacency: Vec<Vec<u32>> = (0..vertex_count).map(|_| Vec::with_capacity(6)).collect();

    for (f_idx, face) in faces.iter().enumerate() {
        let f_idx = u32::try_from(f_idx).map_err(|_| GeodesicError::PoolOverflow)?;
        for &v in face {
            let slot = adjacency
                .get_mut(v as usize)
                .ok_or(GeodesicError::VertexOutOfRange {
                    index: v,
                    len: vertex_count,
                })?;
            slot.push(f_idx);
        }
    }

    Ok(adjacency)
}
