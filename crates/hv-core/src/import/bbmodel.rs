//! Editor project (`.bbmodel`) import

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::ImportError;
use crate::element::{
    CubeElement, CubeFace, Element, ElementKind, FaceKey, Group, MeshElement, MeshFace,
    RenderOrder,
};
use crate::model::Model;
use crate::texture::Texture;

#[derive(Debug, Deserialize)]
struct BbProject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    resolution: Option<BbResolution>,
    #[serde(default)]
    elements: Vec<BbElement>,
    #[serde(default)]
    textures: Vec<BbTexture>,
    #[serde(default)]
    outliner: Vec<BbOutlinerNode>,
}

#[derive(Debug, Deserialize)]
struct BbResolution {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct BbTexture {
    #[serde(default)]
    name: String,
    #[serde(default = "Uuid::new_v4")]
    uuid: Uuid,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    uv_width: Option<f32>,
    #[serde(default)]
    uv_height: Option<f32>,
}

fn default_type() -> String {
    "cube".to_string()
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct BbElement {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    #[serde(default = "Uuid::new_v4")]
    uuid: Uuid,
    #[serde(default = "enabled")]
    visibility: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default = "enabled")]
    export: bool,
    #[serde(default)]
    render_order: Option<String>,
    #[serde(default)]
    color: Option<f32>,
    #[serde(default)]
    mirror_uv: bool,
    #[serde(default)]
    from: Option<[f32; 3]>,
    #[serde(default)]
    to: Option<[f32; 3]>,
    #[serde(default)]
    origin: Option<[f32; 3]>,
    #[serde(default)]
    rotation: Option<[f32; 3]>,
    #[serde(default)]
    faces: BTreeMap<String, BbFace>,
    #[serde(default)]
    vertices: BTreeMap<String, [f32; 3]>,
}

/// Face shared by cubes (`uv` is a rectangle) and meshes (`uv` per vertex)
#[derive(Debug, Deserialize)]
struct BbFace {
    #[serde(default)]
    uv: Value,
    #[serde(default)]
    vertices: Vec<String>,
    /// Texture index, uuid, or null/false
    #[serde(default)]
    texture: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BbOutlinerNode {
    Element(Uuid),
    Group(BbGroup),
}

#[derive(Debug, Deserialize)]
struct BbGroup {
    #[serde(default)]
    name: String,
    #[serde(default = "Uuid::new_v4")]
    uuid: Uuid,
    #[serde(default)]
    children: Vec<BbOutlinerNode>,
}

/// Import an editor project file
pub fn import_bbmodel(path: impl AsRef<Path>) -> Result<Model, ImportError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io(e.to_string()))?;
    let mut model = import_bbmodel_str(&content)?;
    if model.name.is_empty()
        && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
    {
        model.name = stem.to_string();
    }
    Ok(model)
}

/// Import an editor project from its JSON text
pub fn import_bbmodel_str(json: &str) -> Result<Model, ImportError> {
    let project: BbProject =
        serde_json::from_str(json).map_err(|e| ImportError::Json(e.to_string()))?;

    let textures: Vec<Texture> = project
        .textures
        .iter()
        .map(|t| convert_texture(t, project.resolution.as_ref()))
        .collect();

    let mut groups = Vec::new();
    let mut parents = HashMap::new();
    collect_outliner(&project.outliner, None, &mut groups, &mut parents);

    let elements = project
        .elements
        .iter()
        .map(|e| -> Result<Element, ImportError> {
            let mut element = convert_element(e, &textures)?;
            element.parent = parents.get(&element.id).copied();
            Ok(element)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        "Imported '{}': {} element(s), {} texture(s), {} group(s)",
        project.name,
        elements.len(),
        textures.len(),
        groups.len()
    );
    Ok(Model::with_contents(project.name, elements, textures, groups))
}

fn convert_texture(texture: &BbTexture, resolution: Option<&BbResolution>) -> Texture {
    Texture {
        id: texture.uuid,
        name: texture.name.clone(),
        width: texture.width.max(0.0) as u32,
        height: texture.height.max(0.0) as u32,
        uv_width: texture.uv_width.or(resolution.map(|r| r.width)),
        uv_height: texture.uv_height.or(resolution.map(|r| r.height)),
    }
}

fn collect_outliner(
    nodes: &[BbOutlinerNode],
    parent: Option<Uuid>,
    groups: &mut Vec<Group>,
    parents: &mut HashMap<Uuid, Uuid>,
) {
    for node in nodes {
        match node {
            BbOutlinerNode::Element(id) => {
                if let Some(parent) = parent {
                    parents.insert(*id, parent);
                }
            }
            BbOutlinerNode::Group(group) => {
                groups.push(Group {
                    id: group.uuid,
                    name: group.name.clone(),
                });
                collect_outliner(&group.children, Some(group.uuid), groups, parents);
            }
        }
    }
}

fn resolve_texture(value: &Value, textures: &[Texture]) -> Option<Uuid> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| textures.get(i as usize))
            .map(|t| t.id),
        Value::String(s) => Uuid::parse_str(s).ok(),
        _ => None,
    }
}

fn vec3(v: Option<[f32; 3]>) -> Vec3 {
    v.map(Vec3::from_array).unwrap_or(Vec3::ZERO)
}

fn invalid(element: &BbElement, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidElement {
        name: element.name.clone(),
        reason: reason.into(),
    }
}

fn convert_element(source: &BbElement, textures: &[Texture]) -> Result<Element, ImportError> {
    let kind = match source.kind.as_str() {
        "cube" => ElementKind::Cube(convert_cube(source, textures)?),
        "mesh" => ElementKind::Mesh(convert_mesh(source, textures)?),
        other => ElementKind::Other {
            kind: other.to_string(),
        },
    };

    Ok(Element {
        id: source.uuid,
        name: source.name.clone(),
        visibility: source.visibility,
        locked: source.locked,
        export: source.export,
        render_order: match source.render_order.as_deref() {
            Some("behind") => RenderOrder::Behind,
            Some("in_front") => RenderOrder::InFront,
            _ => RenderOrder::Default,
        },
        color: source.color.unwrap_or(0.0).clamp(0.0, 255.0) as u8,
        mirror_uv: source.mirror_uv,
        parent: None,
        kind,
    })
}

fn convert_cube(source: &BbElement, textures: &[Texture]) -> Result<CubeElement, ImportError> {
    let (Some(from), Some(to)) = (source.from, source.to) else {
        return Err(invalid(source, "cube without from/to"));
    };

    let mut cube = CubeElement::new(Vec3::from_array(from), Vec3::from_array(to));
    cube.origin = vec3(source.origin);
    cube.rotation = vec3(source.rotation);

    for (name, face) in &source.faces {
        let Some(key) = FaceKey::from_name(name) else {
            tracing::warn!("Ignoring unknown face '{}' on '{}'", name, source.name);
            continue;
        };
        let uv = match &face.uv {
            Value::Null => [0.0; 4],
            value => serde_json::from_value::<[f32; 4]>(value.clone())
                .map_err(|e| invalid(source, format!("face {name} uv: {e}")))?,
        };
        *cube.faces.get_mut(key) = CubeFace {
            uv,
            texture: resolve_texture(&face.texture, textures),
        };
    }
    Ok(cube)
}

fn convert_mesh(source: &BbElement, textures: &[Texture]) -> Result<MeshElement, ImportError> {
    let mut mesh = MeshElement::new(vec3(source.origin));
    mesh.rotation = vec3(source.rotation);
    mesh.vertices = source
        .vertices
        .iter()
        .map(|(key, p)| (key.clone(), Vec3::from_array(*p)))
        .collect();

    for (key, face) in &source.faces {
        let uv = match &face.uv {
            Value::Null => BTreeMap::new(),
            value => serde_json::from_value::<BTreeMap<String, [f32; 2]>>(value.clone())
                .map_err(|e| invalid(source, format!("face {key} uv: {e}")))?,
        };
        mesh.faces.insert(
            key.clone(),
            MeshFace {
                vertices: face.vertices.clone(),
                uv,
                texture: resolve_texture(&face.texture, textures),
            },
        );
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneSource;

    const PROJECT: &str = r#"{
        "meta": {"format_version": "4.5", "model_format": "free"},
        "name": "golem",
        "resolution": {"width": 64, "height": 64},
        "elements": [
            {
                "name": "body",
                "type": "cube",
                "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f01",
                "from": [-8, 0, -8],
                "to": [8, 16, 8],
                "origin": [0, 0, 0],
                "render_order": "behind",
                "color": 3,
                "faces": {
                    "north": {"uv": [0, 0, 32, 32], "texture": 0},
                    "up": {"uv": [0, 0, 32, 32], "texture": null},
                    "top": {"uv": [0, 0, 1, 1]}
                }
            },
            {
                "name": "arm",
                "type": "mesh",
                "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f02",
                "origin": [10, 4, 0],
                "rotation": [0, 45, 0],
                "visibility": false,
                "vertices": {
                    "a": [0, 0, 0], "b": [4, 0, 0], "c": [4, 0, 4], "d": [0, 0, 4]
                },
                "faces": {
                    "f1": {
                        "vertices": ["a", "d", "c", "b"],
                        "uv": {"a": [0, 0], "b": [8, 0], "c": [8, 8], "d": [0, 8]},
                        "texture": 0
                    }
                }
            },
            {
                "name": "hand",
                "type": "locator",
                "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f03"
            }
        ],
        "outliner": [
            "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f01",
            {
                "name": "limbs",
                "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f10",
                "children": [
                    "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f02",
                    {
                        "name": "hands",
                        "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f11",
                        "children": ["9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f03"]
                    }
                ]
            }
        ],
        "textures": [
            {"name": "golem.png", "uuid": "9a1f0c2e-6a43-4a44-9d9e-5c1b0e7e8f20", "width": 128, "height": 128}
        ]
    }"#;

    #[test]
    fn test_import_project() {
        let model = import_bbmodel_str(PROJECT).unwrap();
        assert_eq!(model.name, "golem");
        assert_eq!(model.elements().len(), 3);
        assert_eq!(model.groups().len(), 2);

        let texture = &model.textures()[0];
        assert_eq!(texture.width, 128);
        assert_eq!(texture.uv_width, Some(64.0));
        assert_eq!(texture.texel_scale(), (2.0, 2.0));

        let body = model.find_by_name("body").unwrap();
        assert_eq!(body.parent, None);
        assert_eq!(body.render_order, RenderOrder::Behind);
        assert_eq!(body.color, 3);
        let cube = body.as_cube().unwrap();
        assert_eq!(cube.size(), Vec3::splat(16.0));
        assert_eq!(cube.faces.get(FaceKey::North).texture, Some(texture.id));
        assert_eq!(cube.faces.get(FaceKey::Up).texture, None);

        let arm = model.find_by_name("arm").unwrap();
        assert!(!arm.visibility);
        assert_eq!(arm.parent, Some(model.groups()[0].id));
        let mesh = arm.as_mesh().unwrap();
        assert_eq!(mesh.rotation, Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces["f1"].uv["c"], [8.0, 8.0]);
        assert_eq!(mesh.faces["f1"].texture, Some(texture.id));

        let hand = model.find_by_name("hand").unwrap();
        assert_eq!(hand.type_name(), "locator");
        assert_eq!(hand.parent, Some(model.groups()[1].id));
    }

    #[test]
    fn test_texture_index_out_of_range() {
        let json = r#"{
            "elements": [{
                "name": "c", "from": [0,0,0], "to": [1,1,1],
                "faces": {"north": {"uv": [0,0,1,1], "texture": 4}}
            }]
        }"#;
        let model = import_bbmodel_str(json).unwrap();
        let cube = model.elements()[0].as_cube().unwrap();
        assert_eq!(cube.faces.get(FaceKey::North).texture, None);
    }

    #[test]
    fn test_cube_without_bounds() {
        let json = r#"{"elements": [{"name": "broken", "type": "cube"}]}"#;
        let result = import_bbmodel_str(json);
        assert!(matches!(result, Err(ImportError::InvalidElement { name, .. }) if name == "broken"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            import_bbmodel_str("{"),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn test_import_file_uses_stem_as_name() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let path = temp.path().join("chest.bbmodel");
        std::fs::write(&path, r#"{"elements": []}"#).unwrap();
        let model = import_bbmodel(&path).unwrap();
        assert_eq!(model.name, "chest");
    }
}
