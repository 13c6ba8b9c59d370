//! The base icosahedron every geodesic sphere starts from.

use glam::DVec3;

use crate::{Triangle, VertexPool};

/// Connectivity of the 20 icosahedron faces over vertices `0..12`.
pub const ICOSAHEDRON_FACES: [Triangle; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Build the 12 unit-sphere icosahedron vertices and its 20 faces.
///
/// Vertices come from the three golden-ratio rectangles `(±1, ±φ, 0)`,
/// `(0, ±1, ±φ)` and `(±φ, 0, ±1)`, each normalized onto the unit sphere.
pub fn generate_icosahedron() -> (VertexPool, Vec<Triangle>) {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;

    let corners = [
        DVec3::new(-1.0, t, 0.0),
        DVec3::new(1.0, t, 0.0),
        DVec3::new(-1.0, -t, 0.0),
        DVec3::new(1.0, -t, 0.0),
        DVec3::new(0.0, -1.0, t),
        DVec3::new(0.0, 1.0, t),
        DVec3::new(0.0, -1.0, -t),
        DVec3::new(0.0, 1.0, -t),
        DVec3::new(t, 0.0, -1.0),
        DVec3::new(t, 0.0, 1.0),
        DVec3::new(-t, 0.0, -1.0),
        DVec3::new(-t, 0.0, 1.0),
    ];

    let pool: VertexPool = corners.into_iter().collect();
    (pool, ICOSAHEDRON_FACES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let (pool, faces) = generate_icosahedron();
        assert_eq!(pool.len(), 12);
        assert_eq!(faces.len(), 20);
        assert_eq!(faces, ICOSAHEDRON_FACES.to_vec());
    }

    #[test]
    fn test_icosahedron_vertices_on_unit_sphere() {
        let (pool, _) = generate_icosahedron();
        for v in pool.vertices() {
            assert!(
                (v.length() - 1.0).abs() < 1e-12,
                "Icosahedron vertex not on unit sphere: {v:?}"
            );
        }
    }

    #[test]
    fn test_every_vertex_has_five_faces() {
        let mut valence = [0usize; 12];
        for face in ICOSAHEDRON_FACES {
            for v in face {
                valence[v as usize] += 1;
            }
        }
        assert!(valence.iter().all(|&n| n == 5), "valence: {valence:?}");
    }

    #[test]
    fn test_edges_are_shared_by_two_faces() {
        let mut edges = std::collections::HashMap::new();
        for [a, b, c] in ICOSAHEDRON_FACES {
            for (x, y) in [(a, b), (b, c), (c, a)] {
                *edges.entry((x.min(y), x.max(y))).or_insert(0) += 1;
            }
        }
        assert_eq!(edges.len(), 30);
        assert!(edges.values().all(|&n| n == 2));
    }

    #[test]
    fn test_edge_lengths_uniform() {
        let (pool, faces) = generate_icosahedron();
        let verts = pool.vertices();
        let reference = (verts[0] - verts[11]).length();
        for [a, b, c] in faces {
            for (x, y) in [(a, b), (b, c), (c, a)] {
                let len = (verts[x as usize] - verts[y as usize]).length();
                assert!((len - reference).abs() < 1e-12);
            }
        }
    }
}
