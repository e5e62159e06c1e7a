//! Cuboid and plane classification for meshes

use std::collections::BTreeSet;

use crate::constants::CUBOID_ROUND_FACTOR;
use crate::element::MeshElement;

/// Check whether a mesh is an axis-aligned box (8 vertices) or an
/// axis-aligned quad (4 vertices)
///
/// Quads are compared with exact equality; boxes tolerate noise below
/// three decimals.
pub fn is_cuboid_or_plane(mesh: &MeshElement) -> bool {
    let positions: Vec<[f32; 3]> = mesh.vertices.values().map(|v| v.to_array()).collect();

    match positions.len() {
        4 => (0..3).any(|axis| exact_distinct(&positions, axis) == 1),
        8 => (0..3).all(|axis| matches!(rounded_distinct(&positions, axis), 1 | 2)),
        _ => false,
    }
}

fn exact_distinct(positions: &[[f32; 3]], axis: usize) -> usize {
    let mut seen: Vec<f32> = Vec::with_capacity(positions.len());
    for p in positions {
        if !seen.contains(&p[axis]) {
            seen.push(p[axis]);
        }
    }
    seen.len()
}

fn rounded_distinct(positions: &[[f32; 3]], axis: usize) -> usize {
    positions
        .iter()
        // half rounds up, as the editor does
        .map(|p| (p[axis] * CUBOID_ROUND_FACTOR + 0.5).floor() as i64)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn mesh_from(points: &[[f32; 3]]) -> MeshElement {
        points
            .iter()
            .enumerate()
            .fold(MeshElement::default(), |mesh, (i, p)| {
                mesh.with_vertex(format!("v{i}"), Vec3::from_array(*p))
            })
    }

    #[test]
    fn test_flat_quad_is_plane() {
        let mesh = mesh_from(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ]);
        assert!(is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_skewed_quad_rejected() {
        let mesh = mesh_from(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.5, 0.2],
            [2.0, 1.0, 1.0],
            [3.0, 2.0, 3.0],
        ]);
        assert!(!is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_quad_uses_exact_equality() {
        // 1e-4 noise passes the box rounding but not the quad check
        let mesh = mesh_from(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0001, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0002, 1.0],
        ]);
        assert!(!is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_cuboid_accepted() {
        let mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::splat(-1.0), Vec3::new(2.0, 3.0, 4.0));
        assert!(is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_cuboid_tolerates_float_noise() {
        let mut mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        if let Some(v) = mesh.vertices.get_mut("v111") {
            *v += Vec3::splat(0.0001);
        }
        assert!(is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_flattened_cuboid_accepted() {
        let mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
        assert!(is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_tapered_cuboid_rejected() {
        let mut mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        if let Some(v) = mesh.vertices.get_mut("v111") {
            v.x = 0.5;
        }
        assert!(!is_cuboid_or_plane(&mesh));
    }

    #[test]
    fn test_wrong_vertex_counts_rejected() {
        assert!(!is_cuboid_or_plane(&MeshElement::default()));
        let triangle = mesh_from(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!is_cuboid_or_plane(&triangle));
        let six = mesh_from(&[[0.0; 3]; 6]);
        assert!(!is_cuboid_or_plane(&six));
    }

    proptest! {
        #[test]
        fn prop_axis_aligned_boxes_accepted(
            min in prop::array::uniform3(-100.0f32..100.0),
            size in prop::array::uniform3(0.0f32..50.0),
        ) {
            let min = Vec3::from_array(min);
            let mesh = MeshElement::cuboid(Vec3::ZERO, min, min + Vec3::from_array(size));
            prop_assert!(is_cuboid_or_plane(&mesh));
        }

        #[test]
        fn prop_third_plane_rejected(
            size in 1.0f32..50.0,
            offset in 0.1f32..0.9,
        ) {
            let mut mesh = MeshElement::cuboid(Vec3::ZERO, Vec3::ZERO, Vec3::splat(size));
            if let Some(v) = mesh.vertices.get_mut("v000") {
                v.y = size * offset;
            }
            prop_assert!(!is_cuboid_or_plane(&mesh));
        }
    }
}
