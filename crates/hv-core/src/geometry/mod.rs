//! Geometric predicates and conversions on model elements
//!
//! - Cuboid/plane classification of meshes
//! - Face direction from polygon winding
//! - Rotation conversion between mesh and cube Euler orders

mod classify;
mod normal;
mod rotation;

pub use classify::is_cuboid_or_plane;
pub use normal::{face_normal, resolve_face};
pub use rotation::{mesh_to_cube_rotation, xyz_rotation_matrix, zyx_angles, zyx_rotation_matrix};
