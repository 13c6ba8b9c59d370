//! Cartesian ↔ latitude/longitude conversion on the unit sphere.
//!
//! +Z is the north pole and longitude 0 lies along +X, increasing towards +Y.

use glam::DVec3;

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, nominally `[-180, 180]`.
    pub lon: f64,
}

impl LatLon {
    /// Create a position from degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Bring a longitude at most one turn out of range back into `[-180, 180]`.
    #[must_use]
    pub fn wrap_longitude(self) -> Self {
        let lon = if self.lon < -180.0 {
            self.lon + 360.0
        } else if self.lon > 180.0 {
            self.lon - 360.0
        } else {
            self.lon
        };
        Self { lat: self.lat, lon }
    }
}

/// Convert a point to latitude/longitude in degrees.
///
/// `lon = atan2(y, x)`, `lat = atan2(z, hypot(x, y))`. The point need not be
/// unit length. At the poles longitude is meaningless and comes out as `atan2`
/// of two near-zero values.
#[inline]
#[must_use]
pub fn cartesian_to_spherical(p: DVec3) -> LatLon {
    let lon = p.y.atan2(p.x).to_degrees();
    let lat = p.z.atan2(p.x.hypot(p.y)).to_degrees();
    LatLon { lat, lon }
}

/// Unit vector for a latitude/longitude in degrees.
#[inline]
#[must_use]
pub fn spherical_to_cartesian(pos: LatLon) -> DVec3 {
    let (sin_lat, cos_lat) = pos.lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = pos.lon.to_radians().sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_axes() {
        let p = cartesian_to_spherical(DVec3::X);
        assert!(p.lat.abs() < EPSILON && p.lon.abs() < EPSILON);

        let p = cartesian_to_spherical(DVec3::Y);
        assert!(p.lat.abs() < EPSILON && (p.lon - 90.0).abs() < EPSILON);

        let p = cartesian_to_spherical(DVec3::Z);
        assert!((p.lat - 90.0).abs() < EPSILON);

        let p = cartesian_to_spherical(DVec3::NEG_X);
        assert!((p.lon.abs() - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_roundtrip_grid() {
        for lat_step in -17..=17 {
            for lon_step in -35..=35 {
                let lat = lat_step as f64 * 5.0;
                let lon = lon_step as f64 * 5.0;
                let back = cartesian_to_spherical(spherical_to_cartesian(LatLon::new(lat, lon)));
                assert!(
                    (back.lat - lat).abs() < EPSILON && (back.lon - lon).abs() < EPSILON,
                    "({lat}, {lon}) came back as ({}, {})",
                    back.lat,
                    back.lon
                );
            }
        }
    }

    #[test]
    fn test_scale_invariant() {
        let a = cartesian_to_spherical(DVec3::new(0.2, -0.4, 0.7));
        let b = cartesian_to_spherical(DVec3::new(2.0, -4.0, 7.0));
        assert!((a.lat - b.lat).abs() < EPSILON);
        assert!((a.lon - b.lon).abs() < EPSILON);
    }

    #[test]
    fn test_spherical_to_cartesian_is_unit() {
        let v = spherical_to_cartesian(LatLon::new(37.5, -122.25));
        assert!((v.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(LatLon::new(10.0, 190.0).wrap_longitude().lon, -170.0);
        assert_eq!(LatLon::new(10.0, -190.0).wrap_longitude().lon, 170.0);
        assert_eq!(LatLon::new(10.0, 45.0).wrap_longitude().lon, 45.0);
        assert_eq!(LatLon::new(10.0, 180.0).wrap_longitude().lon, 180.0);
    }
}
