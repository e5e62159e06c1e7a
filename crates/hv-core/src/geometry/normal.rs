//! Face direction resolution from polygon winding

use glam::Vec3;

use crate::constants::MIN_NORMAL_COMPONENT;
use crate::element::FaceKey;

/// Unit normal from the first three vertices (zero when degenerate)
pub fn face_normal(vertices: &[Vec3]) -> Vec3 {
    let [v0, v1, v2, ..] = vertices else {
        return Vec3::ZERO;
    };
    (*v1 - *v0).cross(*v2 - *v0).normalize_or_zero()
}

/// Map a polygon to the cube face it points toward
///
/// Returns None for degenerate polygons and for faces too oblique to
/// classify (dominant normal component below 0.5).
pub fn resolve_face(vertices: &[Vec3]) -> Option<FaceKey> {
    let normal = face_normal(vertices);
    let abs = normal.abs();

    let mut axis = 0;
    for i in 1..3 {
        if abs[i] > abs[axis] {
            axis = i;
        }
    }
    if abs[axis] < MIN_NORMAL_COMPONENT {
        return None;
    }

    let positive = normal[axis] > 0.0;
    Some(match (axis, positive) {
        (0, true) => FaceKey::East,
        (0, false) => FaceKey::West,
        (1, true) => FaceKey::Up,
        (1, false) => FaceKey::Down,
        (_, true) => FaceKey::South,
        (_, false) => FaceKey::North,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MeshElement;

    #[test]
    fn test_cuboid_faces_resolve_to_their_keys() {
        let mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        for (key, face) in &mesh.faces {
            let positions = mesh.face_positions(face).unwrap();
            let resolved = resolve_face(&positions).unwrap();
            assert_eq!(resolved.name(), key);
        }
    }

    #[test]
    fn test_normal_is_unit_length() {
        let n = face_normal(&[Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 7.0, 0.0)]);
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_too_few_vertices() {
        assert_eq!(face_normal(&[Vec3::ZERO, Vec3::X]), Vec3::ZERO);
        assert_eq!(resolve_face(&[Vec3::ZERO, Vec3::X]), None);
    }

    #[test]
    fn test_collinear_vertices_unresolved() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        assert_eq!(resolve_face(&points), None);
    }

    #[test]
    fn test_oblique_face() {
        // normal (1, 1, 1)/sqrt(3): every component is 0.577, still resolvable
        let diagonal = [Vec3::X, Vec3::Y, Vec3::Z];
        assert_eq!(resolve_face(&diagonal), Some(FaceKey::East));

        // 45 degree tilt between up and south stays above 0.5
        let tilted = [
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        ];
        assert!(resolve_face(&tilted).is_some());
    }

    #[test]
    fn test_sign_conventions() {
        let x_neg = [Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 1.0, 1.0)];
        assert_eq!(resolve_face(&x_neg), Some(FaceKey::West));
        let z_neg = [Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
        assert_eq!(resolve_face(&z_neg), Some(FaceKey::North));
    }
}
