//! Unit-sphere vertex storage with a shared-edge midpoint cache.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::GeodesicError;

/// Owns every vertex of the geodesic sphere.
///
/// Indices are assigned in insertion order and never reused. Midpoints are
/// cached by the sorted endpoint pair so two triangles sharing an edge get the
/// same new vertex instead of two coincident ones.
#[derive(Clone, Debug, Default)]
pub struct VertexPool {
    vertices: Vec<DVec3>,
    midpoints: FxHashMap<(u32, u32), u32>,
}

impl VertexPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pool with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            midpoints: FxHashMap::default(),
        }
    }

    /// Append a vertex, projecting it onto the unit sphere. Returns its index.
    pub fn push(&mut self, point: DVec3) -> Result<u32, GeodesicError> {
        let index = u32::try_from(self.vertices.len()).map_err(|_| GeodesicError::PoolOverflow)?;
        self.vertices.push(point.normalize());
        Ok(index)
    }

    /// Return the index of the normalized midpoint of `a` and `b`, creating it on
    /// first request.
    ///
    /// The lookup is order-independent: `(a, b)` and `(b, a)` resolve to the same
    /// vertex, and repeated calls never grow the pool.
    pub fn add_or_get_midpoint(&mut self, a: u32, b: u32) -> Result<u32, GeodesicError> {
        if a == b {
            return Err(GeodesicError::DegenerateEdge(a));
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&idx) = self.midpoints.get(&key) {
            return Ok(idx);
        }

        let mid = (self.get(a)? + self.get(b)?) / 2.0;
        let idx = self.push(mid)?;
        self.midpoints.insert(key, idx);
        Ok(idx)
    }

    /// Look up a vertex by index.
    pub fn get(&self, index: u32) -> Result<DVec3, GeodesicError> {
        self.vertices
            .get(index as usize)
            .copied()
            .ok_or(GeodesicError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// All vertices in index order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Number of vertices in the pool.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the pool holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drop the midpoint cache once subdivision is finished.
    ///
    /// The cache is only meaningful while edges are still being split; the
    /// vertex list itself is kept.
    pub fn clear_midpoint_cache(&mut self) {
        self.midpoints = FxHashMap::default();
    }
}

impl FromIterator<DVec3> for VertexPool {
    /// Seed a pool with fixed points, each projected onto the unit sphere.
    fn from_iter<I: IntoIterator<Item = DVec3>>(points: I) -> Self {
        Self {
            vertices: points.into_iter().map(DVec3::normalize).collect(),
            midpoints: FxHashMap::default(),
        }
    }
}
