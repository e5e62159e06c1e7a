//! Outliner element definitions
//!
//! An element is either a cube, a mesh, or some other kind the editor
//! supports but this crate does not inspect further.

mod cube;
mod mesh;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use cube::{CubeElement, CubeFace, CubeFaces, FaceKey};
pub use mesh::{MeshElement, MeshFace};

/// Draw order hint carried over verbatim during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderOrder {
    #[default]
    Default,
    Behind,
    InFront,
}

/// A top-level model element in the outliner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: Uuid,
    pub name: String,
    pub visibility: bool,
    pub locked: bool,
    pub export: bool,
    #[serde(default)]
    pub render_order: RenderOrder,
    /// Marker color (palette index)
    #[serde(default)]
    pub color: u8,
    #[serde(default)]
    pub mirror_uv: bool,
    /// Owning group (None = outliner root)
    #[serde(default)]
    pub parent: Option<Uuid>,
    pub kind: ElementKind,
}

/// Variant data of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Cube(CubeElement),
    Mesh(MeshElement),
    /// Any other element type, identified by its type tag
    Other { kind: String },
}

impl Element {
    /// Create a visible element with default flags
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            visibility: true,
            locked: false,
            export: true,
            render_order: RenderOrder::Default,
            color: 0,
            mirror_uv: false,
            parent: None,
            kind,
        }
    }

    /// Create a cube spanning `from..to` with untextured faces
    pub fn cube(name: impl Into<String>, from: Vec3, to: Vec3) -> Self {
        Self::new(name, ElementKind::Cube(CubeElement::new(from, to)))
    }

    /// Create a mesh element
    pub fn mesh(name: impl Into<String>, mesh: MeshElement) -> Self {
        Self::new(name, ElementKind::Mesh(mesh))
    }

    /// Type tag as the editor names it
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ElementKind::Cube(_) => "cube",
            ElementKind::Mesh(_) => "mesh",
            ElementKind::Other { kind } => kind,
        }
    }

    pub fn as_cube(&self) -> Option<&CubeElement> {
        match &self.kind {
            ElementKind::Cube(cube) => Some(cube),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshElement> {
        match &self.kind {
            ElementKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Set the owning group
    pub fn with_parent(mut self, parent: Option<Uuid>) -> Self {
        self.parent = parent;
        self
    }
}

/// Named group in the outliner hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let cube = Element::cube("a", Vec3::ZERO, Vec3::ONE);
        let mesh = Element::mesh("b", MeshElement::default());
        let other = Element::new(
            "c",
            ElementKind::Other {
                kind: "locator".to_string(),
            },
        );
        assert_eq!(cube.type_name(), "cube");
        assert_eq!(mesh.type_name(), "mesh");
        assert_eq!(other.type_name(), "locator");
        assert!(cube.as_cube().is_some());
        assert!(cube.as_mesh().is_none());
        assert!(mesh.as_mesh().is_some());
    }

    #[test]
    fn test_new_element_defaults() {
        let element = Element::cube("a", Vec3::ZERO, Vec3::ONE);
        assert!(element.visibility);
        assert!(element.export);
        assert!(!element.locked);
        assert_eq!(element.parent, None);
    }
}
