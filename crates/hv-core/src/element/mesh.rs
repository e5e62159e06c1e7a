//! Free-form polygon mesh elements

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polygon of a mesh, referencing vertices by key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshFace {
    /// Ordered vertex keys (winding defines the normal)
    pub vertices: Vec<String>,
    /// UV coordinate per vertex key
    #[serde(default)]
    pub uv: BTreeMap<String, [f32; 2]>,
    #[serde(default)]
    pub texture: Option<Uuid>,
}

impl MeshFace {
    pub fn new<S: Into<String>>(vertices: impl IntoIterator<Item = S>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
            uv: BTreeMap::new(),
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Uuid) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_uv(mut self, vertex: impl Into<String>, uv: [f32; 2]) -> Self {
        self.uv.insert(vertex.into(), uv);
        self
    }

    /// UV coordinates in vertex order, or None if any vertex is unmapped
    pub fn uv_coords(&self) -> Option<Vec<[f32; 2]>> {
        self.vertices
            .iter()
            .map(|key| self.uv.get(key).copied())
            .collect()
    }
}

/// Mesh element
///
/// Rotation is in degrees and is applied X first, then Y, then Z
/// (matrix `Rx * Ry * Rz`) around `origin`. Vertex positions are local
/// to `origin`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshElement {
    pub origin: Vec3,
    pub rotation: Vec3,
    pub vertices: BTreeMap<String, Vec3>,
    pub faces: BTreeMap<String, MeshFace>,
}

impl MeshElement {
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Build an eight-vertex cuboid spanning `min..max` in local space
    ///
    /// Faces are keyed by the direction they face and wound outward.
    /// Vertex keys are `v<x><y><z>` with 0 = min, 1 = max per axis.
    pub fn cuboid(origin: Vec3, min: Vec3, max: Vec3) -> Self {
        let mut mesh = Self::new(origin);
        for ix in 0..2 {
            for iy in 0..2 {
                for iz in 0..2 {
                    let pick = |i: usize, lo: f32, hi: f32| if i == 0 { lo } else { hi };
                    mesh.vertices.insert(
                        format!("v{ix}{iy}{iz}"),
                        Vec3::new(
                            pick(ix, min.x, max.x),
                            pick(iy, min.y, max.y),
                            pick(iz, min.z, max.z),
                        ),
                    );
                }
            }
        }

        let quads = [
            ("up", ["v010", "v011", "v111", "v110"]),
            ("down", ["v000", "v100", "v101", "v001"]),
            ("east", ["v100", "v110", "v111", "v101"]),
            ("west", ["v000", "v001", "v011", "v010"]),
            ("south", ["v001", "v101", "v111", "v011"]),
            ("north", ["v000", "v010", "v110", "v100"]),
        ];
        for (key, corners) in quads {
            mesh.faces.insert(key.to_string(), MeshFace::new(corners));
        }
        mesh
    }

    pub fn with_vertex(mut self, key: impl Into<String>, position: Vec3) -> Self {
        self.vertices.insert(key.into(), position);
        self
    }

    pub fn with_face(mut self, key: impl Into<String>, face: MeshFace) -> Self {
        self.faces.insert(key.into(), face);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Local positions of a face's vertices, or None if a key is dangling
    pub fn face_positions(&self, face: &MeshFace) -> Option<Vec<Vec3>> {
        face.vertices
            .iter()
            .map(|key| self.vertices.get(key).copied())
            .collect()
    }

    /// Local-space bounding box (min, max), None for an empty mesh
    pub fn local_bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in self.vertices.values() {
            min = min.min(*v);
            max = max.max(*v);
        }
        Some((min, max))
    }
}
