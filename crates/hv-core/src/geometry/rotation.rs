//! Rotation conversion between the mesh and cube Euler orders
//!
//! Meshes compose their angles as `Rx * Ry * Rz`; cubes compose them as
//! `Rz * Ry * Rx`. Converting goes through the shared rotation matrix.

use glam::{Mat3, Vec3};

use crate::constants::GIMBAL_LOCK_THRESHOLD;

/// Rotation matrix for mesh angles (degrees), `Rx * Ry * Rz`
pub fn xyz_rotation_matrix(degrees: Vec3) -> Mat3 {
    let r = degrees * (std::f32::consts::PI / 180.0);
    Mat3::from_rotation_x(r.x) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_z(r.z)
}

/// Rotation matrix for cube angles (degrees), `Rz * Ry * Rx`
pub fn zyx_rotation_matrix(degrees: Vec3) -> Mat3 {
    let r = degrees * (std::f32::consts::PI / 180.0);
    Mat3::from_rotation_z(r.z) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_x(r.x)
}

/// Element at `row`, `col` (glam stores columns)
fn at(m: &Mat3, row: usize, col: usize) -> f32 {
    m.col(col)[row]
}

/// Decompose a rotation matrix into cube angles (degrees)
///
/// At gimbal lock the Z angle is forced to zero and the whole remaining
/// rotation is carried by X.
pub fn zyx_angles(m: &Mat3) -> Vec3 {
    let m20 = at(m, 2, 0);
    let y = (-m20).clamp(-1.0, 1.0).asin();

    let (x, z) = if m20.abs() < GIMBAL_LOCK_THRESHOLD {
        (
            at(m, 2, 1).atan2(at(m, 2, 2)),
            at(m, 1, 0).atan2(at(m, 0, 0)),
        )
    } else {
        ((-at(m, 1, 2)).atan2(at(m, 1, 1)), 0.0)
    };

    Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI)
}

/// Convert mesh rotation angles to the cube order, preserving orientation
pub fn mesh_to_cube_rotation(degrees: Vec3) -> Vec3 {
    zyx_angles(&xyz_rotation_matrix(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn max_diff(a: &Mat3, b: &Mat3) -> f32 {
        (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .map(|(r, c)| (at(a, r, c) - at(b, r, c)).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_identity() {
        assert_eq!(mesh_to_cube_rotation(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_single_axis_unchanged() {
        for rotation in [
            Vec3::new(30.0, 0.0, 0.0),
            Vec3::new(0.0, 45.0, 0.0),
            Vec3::new(0.0, 0.0, -60.0),
        ] {
            let converted = mesh_to_cube_rotation(rotation);
            assert_relative_eq!(converted.x, rotation.x, epsilon = 1e-3);
            assert_relative_eq!(converted.y, rotation.y, epsilon = 1e-3);
            assert_relative_eq!(converted.z, rotation.z, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_compound_rotation_changes_angles() {
        let rotation = Vec3::new(30.0, 20.0, 45.0);
        let converted = mesh_to_cube_rotation(rotation);
        assert!((converted - rotation).length() > 1.0);
        let diff = max_diff(
            &zyx_rotation_matrix(converted),
            &xyz_rotation_matrix(rotation),
        );
        assert!(diff < 1e-4, "matrix mismatch {diff}");
    }

    #[test]
    fn test_gimbal_lock_keeps_orientation() {
        for rotation in [Vec3::new(90.0, 25.0, 90.0), Vec3::new(0.0, -90.0, 0.0)] {
            let converted = mesh_to_cube_rotation(rotation);
            assert_eq!(converted.z, 0.0);
            let diff = max_diff(
                &zyx_rotation_matrix(converted),
                &xyz_rotation_matrix(rotation),
            );
            assert!(diff < 1e-3, "matrix mismatch {diff} for {rotation}");
        }
    }

    proptest! {
        #[test]
        fn prop_orientation_round_trip(
            x in -180.0f32..180.0,
            y in -180.0f32..180.0,
            z in -180.0f32..180.0,
        ) {
            let rotation = Vec3::new(x, y, z);
            let converted = mesh_to_cube_rotation(rotation);
            let diff = max_diff(
                &zyx_rotation_matrix(converted),
                &xyz_rotation_matrix(rotation),
            );
            prop_assert!(diff < 1e-3, "matrix mismatch {} for {}", diff, rotation);
        }
    }
}
