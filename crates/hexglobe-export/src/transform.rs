//! Rigid transforms applied to finished position buffers.

use glam::{DQuat, DVec3};

/// Rotate every `x, y, z` triple in `positions` by `degrees` about `axis`,
/// pivoting on the mean of all positions.
///
/// A zero angle, a zero axis, or an empty buffer leaves the positions untouched.
pub fn rotate_positions(positions: &mut [f32], axis: DVec3, degrees: f64) {
    let count = positions.len() / 3;
    if count == 0 || degrees == 0.0 || axis.length_squared() == 0.0 {
        return;
    }

    let rotation = DQuat::from_axis_angle(axis.normalize(), degrees.to_radians());

    let pivot = positions
        .chunks_exact(3)
        .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .sum::<DVec3>()
        / count as f64;

    for p in positions.chunks_exact_mut(3) {
        let v = DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64);
        let r = rotation * (v - pivot) + pivot;
        p[0] = r.x as f32;
        p[1] = r.y as f32;
        p[2] = r.z as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < EPSILON, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_minus_ninety_about_x_maps_z_up_to_y_up() {
        // Symmetric about the origin, so the pivot is the origin.
        let mut positions = vec![0.0, 0.0, 1.0, 0.0, 0.0, -1.0];
        rotate_positions(&mut positions, DVec3::X, -90.0);
        assert_close(&positions, &[0.0, 1.0, 0.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_rotation_about_centroid() {
        let mut positions = vec![5.0, 0.0, 1.0, 5.0, 0.0, -1.0];
        rotate_positions(&mut positions, DVec3::X, -90.0);
        assert_close(&positions, &[5.0, 1.0, 0.0, 5.0, -1.0, 0.0]);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let original = vec![0.3, -0.2, 0.9, 1.0, 2.0, 3.0];
        let mut positions = original.clone();
        rotate_positions(&mut positions, DVec3::Y, 0.0);
        assert_eq!(positions, original);
    }

    #[test]
    fn test_preserves_distance_from_pivot() {
        let mut positions = vec![1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.6, 0.8, 0.0, -0.6, -0.8];
        rotate_positions(&mut positions, DVec3::new(1.0, 1.0, 0.0), 37.0);
        for p in positions.chunks_exact(3) {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_empty_buffer() {
        let mut positions: Vec<f32> = Vec::new();
        rotate_positions(&mut positions, DVec3::X, 90.0);
        assert!(positions.is_empty());
    }
}
