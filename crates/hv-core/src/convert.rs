//! Mesh-to-cube conversion
//!
//! Meshes that classify as cuboids or planes are replaced by cube
//! elements occupying the same space, with the same orientation, flags,
//! parent and per-face textures. All replacements of one call form a
//! single undoable edit.

use glam::Vec3;
use uuid::Uuid;

use crate::element::{CubeElement, Element, ElementKind, MeshElement};
use crate::geometry::{is_cuboid_or_plane, mesh_to_cube_rotation, resolve_face};
use crate::scene::{EditScope, SceneEditor};

/// Label recorded in the undo history
pub const CONVERT_EDIT_LABEL: &str = "Convert meshes to cubes";

/// Errors that make a single mesh unconvertible
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Element is not a mesh")]
    NotAMesh,

    #[error("Mesh has no vertices")]
    EmptyMesh,

    #[error("Face '{face}' references missing vertex '{vertex}'")]
    MissingVertex { face: String, vertex: String },

    #[error("Face '{face}' has vertices without UV coordinates")]
    MissingUv { face: String },

    #[error("Non-finite {0}")]
    NonFinite(&'static str),
}

/// Result of a conversion batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionSummary {
    /// Ids of the cubes created
    pub created: Vec<Uuid>,
    /// Ids of the meshes removed
    pub removed: Vec<Uuid>,
    /// Meshes left untouched (hidden, not box-shaped, or failed)
    pub skipped: usize,
}

impl ConversionSummary {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Convert every mesh in the scene
pub fn convert_all_meshes<E: SceneEditor + ?Sized>(editor: &mut E) -> ConversionSummary {
    let ids: Vec<Uuid> = editor
        .elements()
        .iter()
        .filter(|e| e.as_mesh().is_some())
        .map(|e| e.id)
        .collect();
    convert_meshes(editor, &ids)
}

/// Convert the given meshes into cubes inside one edit
///
/// Ids that are not visible cuboid/plane meshes, and meshes that fail to
/// convert, are counted as skipped.
pub fn convert_meshes<E: SceneEditor + ?Sized>(editor: &mut E, ids: &[Uuid]) -> ConversionSummary {
    let mut summary = ConversionSummary::default();

    let qualifying: Vec<Uuid> = ids
        .iter()
        .copied()
        .filter(|id| {
            let ok = editor
                .element(*id)
                .filter(|e| e.visibility)
                .and_then(Element::as_mesh)
                .is_some_and(is_cuboid_or_plane);
            if !ok {
                summary.skipped += 1;
            }
            ok
        })
        .collect();

    if qualifying.is_empty() {
        tracing::info!("No meshes to convert ({} skipped)", summary.skipped);
        return summary;
    }

    let mut scope = EditScope::begin(editor, CONVERT_EDIT_LABEL, &qualifying);
    for id in qualifying {
        let Some(source) = scope.scene().element(id).cloned() else {
            summary.skipped += 1;
            continue;
        };

        let cube = match cube_from_mesh_element(&source) {
            Ok(cube) => cube,
            Err(e) => {
                tracing::warn!("Skipping mesh '{}': {}", source.name, e);
                summary.skipped += 1;
                continue;
            }
        };

        let cube_id = scope.add_element(cube, source.parent);
        scope.remove_element(id);
        tracing::debug!("Converted mesh '{}' to cube {}", source.name, cube_id);
        summary.created.push(cube_id);
        summary.removed.push(id);
    }
    scope.commit();

    tracing::info!(
        "Converted {} mesh(es) to cubes, {} skipped",
        summary.created_count(),
        summary.skipped
    );
    summary
}

/// Build the replacement cube element for a mesh element
///
/// Flags and name are carried over; the parent is assigned on insertion.
pub fn cube_from_mesh_element(source: &Element) -> Result<Element, ConvertError> {
    let ElementKind::Mesh(mesh) = &source.kind else {
        return Err(ConvertError::NotAMesh);
    };
    let cube = cube_from_mesh(mesh)?;
    Ok(Element {
        id: Uuid::new_v4(),
        kind: ElementKind::Cube(cube),
        ..source.clone()
    })
}

/// Derive an equivalent cube from a mesh
///
/// UVs become the bounding rectangle of each face's UV coordinates, so
/// rotated or non-rectangular mappings are approximated.
pub fn cube_from_mesh(mesh: &MeshElement) -> Result<CubeElement, ConvertError> {
    let (min, max) = mesh.local_bounds().ok_or(ConvertError::EmptyMesh)?;
    ensure_finite(min, "vertex position")?;
    ensure_finite(max, "vertex position")?;
    ensure_finite(mesh.origin, "mesh origin")?;

    let rotation = mesh_to_cube_rotation(mesh.rotation);
    ensure_finite(rotation, "rotation")?;

    let mut cube = CubeElement {
        from: min + mesh.origin,
        to: max + mesh.origin,
        origin: mesh.origin,
        rotation,
        faces: Default::default(),
    };

    for (face_key, face) in &mesh.faces {
        let positions = mesh.face_positions(face).ok_or_else(|| {
            let vertex = face
                .vertices
                .iter()
                .find(|v| !mesh.vertices.contains_key(*v))
                .cloned()
                .unwrap_or_default();
            ConvertError::MissingVertex {
                face: face_key.clone(),
                vertex,
            }
        })?;

        let Some(key) = resolve_face(&positions) else {
            tracing::debug!("Face '{}' is too oblique, not transferred", face_key);
            continue;
        };

        let target = cube.faces.get_mut(key);
        target.texture = face.texture;
        if face.uv.is_empty() {
            continue;
        }
        let uvs = face.uv_coords().ok_or_else(|| ConvertError::MissingUv {
            face: face_key.clone(),
        })?;
        target.uv = uv_bounds(&uvs);
    }

    Ok(cube)
}

fn ensure_finite(v: Vec3, what: &'static str) -> Result<(), ConvertError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConvertError::NonFinite(what))
    }
}

/// Axis-aligned UV rectangle `[u_min, v_min, u_max, v_max]`
fn uv_bounds(uvs: &[[f32; 2]]) -> [f32; 4] {
    uvs.iter().fold(
        [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
        |[u0, v0, u1, v1], [u, v]| [u0.min(*u), v0.min(*v), u1.max(*u), v1.max(*v)],
    )
}
