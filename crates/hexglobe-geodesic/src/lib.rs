//! Geodesic sphere geometry: icosahedron subdivision, Goldberg dual construction,
//! polygon ordering, fan triangulation, and latitude/longitude projection.
//!
//! The pipeline is single-threaded and owns its state:
//! [`generate_icosahedron`] → [`GeodesicSphere::new`] (N rounds of [`subdivide`])
//! → [`build_dual`] → [`fan_triangulate`] per dual face.

mod dual;
mod error;
mod icosahedron;
mod polygon;
mod pool;
mod spherical;
mod subdivide;
mod triangulate;

pub use dual::{DualFace, DualMesh, FaceCensus, FaceKind, build_dual};
pub use error::GeodesicError;
pub use icosahedron::{ICOSAHEDRON_FACES, generate_icosahedron};
pub use polygon::{TangentFrame, order_polygon};
pub use pool::VertexPool;
pub use spherical::{LatLon, cartesian_to_spherical, spherical_to_cartesian};
pub use subdivide::{GeodesicSphere, expected_triangle_count, expected_vertex_count, subdivide};
pub use triangulate::{fan_triangulate, polygon_centroid};

/// A triangle as three indices into a [`VertexPool`].
pub type Triangle = [u32; 3];
