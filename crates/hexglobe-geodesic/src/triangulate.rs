//! Fan triangulation of convex polygons around their centroid.

use glam::DVec3;

/// Arithmetic mean of a set of points. Returns the origin for an empty slice.
pub fn polygon_centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Split an ordered convex polygon into `n` triangles sharing its centroid.
///
/// Triangle `i` is `(p_i, p_{i+1 mod n}, centroid)`, so the input winding is
/// preserved. Planarity and convexity are assumed, not checked.
pub fn fan_triangulate(points: &[DVec3]) -> Vec<[DVec3; 3]> {
    let centroid = polygon_centroid(points);
    let n = points.len();
    (0..n)
        .map(|i| [points[i], points[(i + 1) % n], centroid])
        .collect()
}
