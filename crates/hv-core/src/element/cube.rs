//! Cube elements and their six named faces

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the six axis-aligned cube faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKey {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl FaceKey {
    /// All faces in outliner order
    pub const ALL: [FaceKey; 6] = [
        FaceKey::North,
        FaceKey::East,
        FaceKey::South,
        FaceKey::West,
        FaceKey::Up,
        FaceKey::Down,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FaceKey::North => "north",
            FaceKey::East => "east",
            FaceKey::South => "south",
            FaceKey::West => "west",
            FaceKey::Up => "up",
            FaceKey::Down => "down",
        }
    }

    /// Parse a face name as used in project files
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Indices of the (width, height) axes spanned by this face
    pub fn plane_axes(&self) -> (usize, usize) {
        match self {
            FaceKey::North | FaceKey::South => (0, 1),
            FaceKey::East | FaceKey::West => (2, 1),
            FaceKey::Up | FaceKey::Down => (0, 2),
        }
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Texture assignment of a single cube face
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CubeFace {
    /// UV rectangle `[u0, v0, u1, v1]`
    pub uv: [f32; 4],
    pub texture: Option<Uuid>,
}

impl CubeFace {
    pub fn textured(texture: Uuid, uv: [f32; 4]) -> Self {
        Self {
            uv,
            texture: Some(texture),
        }
    }

    /// Absolute UV span (width, height)
    pub fn uv_span(&self) -> (f32, f32) {
        (
            (self.uv[2] - self.uv[0]).abs(),
            (self.uv[3] - self.uv[1]).abs(),
        )
    }
}

/// The six faces of a cube; always present
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CubeFaces {
    pub north: CubeFace,
    pub east: CubeFace,
    pub south: CubeFace,
    pub west: CubeFace,
    pub up: CubeFace,
    pub down: CubeFace,
}

impl CubeFaces {
    pub fn get(&self, key: FaceKey) -> &CubeFace {
        match key {
            FaceKey::North => &self.north,
            FaceKey::East => &self.east,
            FaceKey::South => &self.south,
            FaceKey::West => &self.west,
            FaceKey::Up => &self.up,
            FaceKey::Down => &self.down,
        }
    }

    pub fn get_mut(&mut self, key: FaceKey) -> &mut CubeFace {
        match key {
            FaceKey::North => &mut self.north,
            FaceKey::East => &mut self.east,
            FaceKey::South => &mut self.south,
            FaceKey::West => &mut self.west,
            FaceKey::Up => &mut self.up,
            FaceKey::Down => &mut self.down,
        }
    }

    /// Iterate faces in outliner order
    pub fn iter(&self) -> impl Iterator<Item = (FaceKey, &CubeFace)> {
        FaceKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Axis-aligned box primitive
///
/// Rotation is in degrees and is applied Z first, then Y, then X
/// (matrix `Rz * Ry * Rx`) around `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeElement {
    pub from: Vec3,
    pub to: Vec3,
    /// Rotation pivot
    pub origin: Vec3,
    pub rotation: Vec3,
    pub faces: CubeFaces,
}

impl CubeElement {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self {
            from,
            to,
            origin: Vec3::ZERO,
            rotation: Vec3::ZERO,
            faces: CubeFaces::default(),
        }
    }

    /// Extent along each axis (`to - from`)
    pub fn size(&self) -> Vec3 {
        self.to - self.from
    }

    /// Real-world (width, height) of a face
    pub fn face_size(&self, key: FaceKey) -> (f32, f32) {
        let size = self.size();
        let (w, h) = key.plane_axes();
        (size[w], size[h])
    }

    /// Number of axes with exactly zero extent
    pub fn zero_extent_count(&self) -> usize {
        self.size().to_array().iter().filter(|s| **s == 0.0).count()
    }

    /// Assign a texture and UV rectangle to a face
    pub fn with_face(mut self, key: FaceKey, face: CubeFace) -> Self {
        *self.faces.get_mut(key) = face;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_size_pairs() {
        let cube = CubeElement::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(cube.face_size(FaceKey::North), (2.0, 4.0));
        assert_eq!(cube.face_size(FaceKey::South), (2.0, 4.0));
        assert_eq!(cube.face_size(FaceKey::East), (6.0, 4.0));
        assert_eq!(cube.face_size(FaceKey::West), (6.0, 4.0));
        assert_eq!(cube.face_size(FaceKey::Up), (2.0, 6.0));
        assert_eq!(cube.face_size(FaceKey::Down), (2.0, 6.0));
    }

    #[test]
    fn test_zero_extent_count() {
        let plane = CubeElement::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(plane.zero_extent_count(), 1);
        let line = CubeElement::new(Vec3::ONE, Vec3::new(1.0, 1.0, 5.0));
        assert_eq!(line.zero_extent_count(), 2);
    }

    #[test]
    fn test_uv_span_is_absolute() {
        let face = CubeFace::textured(Uuid::nil(), [8.0, 8.0, 0.0, 4.0]);
        assert_eq!(face.uv_span(), (8.0, 4.0));
    }

    #[test]
    fn test_face_key_names() {
        for key in FaceKey::ALL {
            assert_eq!(FaceKey::from_name(key.name()), Some(key));
        }
        assert_eq!(FaceKey::from_name("top"), None);
    }
}
