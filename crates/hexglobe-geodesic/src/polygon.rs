//! Angular (cyclic) ordering of polygon vertices around a surface normal.

use glam::DVec3;

/// Cross products shorter than this treat the normal as parallel to the up axis.
const PARALLEL_EPSILON: f64 = 1e-9;

/// An orthonormal basis of the plane perpendicular to a normal.
///
/// `(x_axis, y_axis, normal)` is right-handed, so angles measured with
/// [`TangentFrame::angle`] increase counter-clockwise when viewed from the
/// tip of the normal looking back at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentFrame {
    /// Unit normal of the plane.
    pub normal: DVec3,
    /// First in-plane axis.
    pub x_axis: DVec3,
    /// Second in-plane axis, `normal × x_axis`.
    pub y_axis: DVec3,
}

impl TangentFrame {
    /// Build a frame for `normal`.
    ///
    /// The first axis is derived from world +Z (the geographic north pole).
    /// At the poles, where the normal is parallel to +Z, world +X is used
    /// directly as the first axis.
    pub fn from_normal(normal: DVec3) -> Self {
        let normal = normal.normalize();
        let up_cross = DVec3::Z.cross(normal);
        let x_axis = if up_cross.length() < PARALLEL_EPSILON {
            DVec3::X
        } else {
            up_cross.normalize()
        };
        let y_axis = normal.cross(x_axis);
        Self {
            normal,
            x_axis,
            y_axis,
        }
    }

    /// Angle in radians of `point` around `center`, projected onto the frame's plane.
    #[inline]
    pub fn angle(&self, center: DVec3, point: DVec3) -> f64 {
        let offset = point - center;
        offset.dot(self.y_axis).atan2(offset.dot(self.x_axis))
    }
}

/// Sort `points` counter-clockwise around `center`.
///
/// The normal is `center`'s own direction from the origin, which for dual faces
/// on the unit sphere is the outward surface normal. Points at exactly equal
/// angles keep an arbitrary relative order.
pub fn order_polygon(points: Vec<DVec3>, center: DVec3) -> Vec<DVec3> {
    let frame = TangentFrame::from_normal(center);

    let mut keyed: Vec<(f64, DVec3)> = points
        .into_iter()
        .map(|p| (frame.angle(center, p), p))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    keyed.into_iter().map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn ring(center: DVec3, n: usize, radius: f64) -> Vec<DVec3> {
        let frame = TangentFrame::from_normal(center);
        (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                center + radius * (a.cos() * frame.x_axis + a.sin() * frame.y_axis)
            })
            .collect()
    }

    fn is_monotonic(frame: &TangentFrame, center: DVec3, points: &[DVec3]) -> bool {
        points
            .windows(2)
            .all(|w| frame.angle(center, w[0]) <= frame.angle(center, w[1]))
    }

    #[test]
    fn test_frame_is_orthonormal() {
        for normal in [
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::X,
            DVec3::Z,
            DVec3::NEG_Z,
            DVec3::new(0.0, -1.0, 0.2),
        ] {
            let f = TangentFrame::from_normal(normal);
            assert!((f.x_axis.length() - 1.0).abs() < 1e-12);
            assert!((f.y_axis.length() - 1.0).abs() < 1e-12);
            assert!(f.x_axis.dot(f.normal).abs() < 1e-12);
            assert!(f.y_axis.dot(f.normal).abs() < 1e-12);
            assert!(f.x_axis.dot(f.y_axis).abs() < 1e-12);
            // Right-handed.
            assert!((f.x_axis.cross(f.y_axis) - f.normal).length() < 1e-12);
        }
    }

    #[test]
    fn test_pole_uses_fallback_axis() {
        let north = TangentFrame::from_normal(DVec3::Z);
        assert_eq!(north.x_axis, DVec3::X);
        let south = TangentFrame::from_normal(DVec3::NEG_Z);
        assert_eq!(south.x_axis, DVec3::X);
    }

    #[test]
    fn test_shuffled_hexagon_is_reordered_ccw() {
        let center = DVec3::new(0.3, -0.5, 0.8).normalize();
        let expected = ring(center, 6, 0.1);
        let shuffled = vec![
            expected[3],
            expected[0],
            expected[5],
            expected[1],
            expected[4],
            expected[2],
        ];
        let ordered = order_polygon(shuffled, center);

        let frame = TangentFrame::from_normal(center);
        assert!(is_monotonic(&frame, center, &ordered));

        // Consecutive points are ring neighbours (cyclic shift of the ring).
        let start = expected
            .iter()
            .position(|p| (*p - ordered[0]).length() < 1e-12)
            .unwrap();
        for (i, p) in ordered.iter().enumerate() {
            assert!((*p - expected[(start + i) % 6]).length() < 1e-12);
        }
    }

    #[test]
    fn test_ordering_at_pole() {
        let center = DVec3::NEG_Z;
        let pts = ring(center, 5, 0.2);
        let ordered = order_polygon(pts.iter().rev().copied().collect(), center);
        let frame = TangentFrame::from_normal(center);
        assert!(is_monotonic(&frame, center, &ordered));
        assert_eq!(ordered.len(), 5);
    }

    #[test]
    fn test_ordered_polygon_winds_with_normal() {
        let center = DVec3::new(-0.7, 0.1, 0.2).normalize();
        let ordered = order_polygon(ring(center, 6, 0.05), center);
        // Shoelace-style signed area via cross products around the center.
        let mut area = DVec3::ZERO;
        for i in 0..ordered.len() {
            let a = ordered[i] - center;
            let b = ordered[(i + 1) % ordered.len()] - center;
            area += a.cross(b);
        }
        assert!(area.dot(center) > 0.0, "polygon should be CCW about the outward normal");
    }

    #[test]
    fn test_empty_input() {
        assert!(order_polygon(Vec::new(), DVec3::Y).is_empty());
    }
}
