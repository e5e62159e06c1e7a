//! Texel density verification
//!
//! Walks every visible element and checks, in order:
//! 1. element shape legality (cube, or mesh that is a cuboid/plane)
//! 2. cube face UV size against the face's world size
//! 3. mesh face UV size against the face's world size
//!
//! Mesh findings are folded into one issue per mesh.

mod report;

use glam::Vec3;
use uuid::Uuid;

use crate::config::VerifyConfig;
use crate::constants::{MIN_FACE_EXTENT, UNITS_PER_BLOCK};
use crate::element::{CubeElement, Element, ElementKind, MeshElement, MeshFace};
use crate::geometry::is_cuboid_or_plane;
use crate::scene::SceneSource;

pub use report::{Issue, Report};

/// Verify every visible element of `scene` against `config`
pub fn verify_density<S: SceneSource + ?Sized>(scene: &S, config: &VerifyConfig) -> Report {
    let verifier = DensityVerifier::new(scene, config);
    let issues = verifier.collect_issues();
    tracing::info!(
        "{} verification at {}px: {} issue(s)",
        config.label,
        config.density,
        issues.len()
    );
    Report::new(
        config.label.clone(),
        config.density,
        issues,
        config.max_listed_issues,
    )
}

/// Pixels needed to cover `world` units at `density` pixels per block
pub fn required_pixels(world: f32, density: u32) -> f32 {
    (world / UNITS_PER_BLOCK) * density as f32
}

/// First failing face of a mesh plus how many faces failed in total
struct MeshFinding {
    mesh: Uuid,
    name: String,
    count: usize,
    observed: String,
}

/// Density checks over one scene
pub struct DensityVerifier<'a, S: SceneSource + ?Sized> {
    scene: &'a S,
    config: &'a VerifyConfig,
}

impl<'a, S: SceneSource + ?Sized> DensityVerifier<'a, S> {
    pub fn new(scene: &'a S, config: &'a VerifyConfig) -> Self {
        Self { scene, config }
    }

    fn visible(&self) -> impl Iterator<Item = &'a Element> {
        self.scene.elements().iter().filter(|e| e.visibility)
    }

    fn expected(&self) -> String {
        format!("{}px density", self.config.density)
    }

    fn exceeds(&self, actual: f32, needed: f32) -> bool {
        (actual - needed).abs() > self.config.tolerance_px
    }

    /// Run all passes and return issues in discovery order
    pub fn collect_issues(&self) -> Vec<Issue> {
        let mut issues = self.shape_issues();
        issues.extend(self.cube_face_issues());
        issues.extend(self.mesh_face_issues());
        issues
    }

    /// Elements that are not cubes, cuboid meshes or flat planes
    pub fn shape_issues(&self) -> Vec<Issue> {
        self.visible().filter_map(shape_issue).collect()
    }

    /// Textured cube faces whose UV size does not match the density
    pub fn cube_face_issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for element in self.visible() {
            if let ElementKind::Cube(cube) = &element.kind {
                self.check_cube(&element.name, cube, &mut issues);
            }
        }
        issues
    }

    fn check_cube(&self, name: &str, cube: &CubeElement, issues: &mut Vec<Issue>) {
        for (key, face) in cube.faces.iter() {
            let Some(texture) = face.texture.and_then(|id| self.scene.texture(id)) else {
                continue;
            };

            let (scale_u, scale_v) = texture.texel_scale();
            let (span_u, span_v) = face.uv_span();
            let actual = (span_u * scale_u, span_v * scale_v);

            let (width, height) = cube.face_size(key);
            let needed = (
                required_pixels(width, self.config.density),
                required_pixels(height, self.config.density),
            );

            if self.exceeds(actual.0, needed.0) || self.exceeds(actual.1, needed.1) {
                tracing::debug!("Density mismatch on '{}' {} face", name, key);
                issues.push(Issue::new(
                    format!("{name} ({key} face)"),
                    format!(
                        "{:.1}x{:.1} pixels (need {:.1}x{:.1})",
                        actual.0, actual.1, needed.0, needed.1
                    ),
                    self.expected(),
                ));
            }
        }
    }

    /// Textured mesh faces whose UV size does not match the density,
    /// one issue per mesh
    pub fn mesh_face_issues(&self) -> Vec<Issue> {
        let mut findings: Vec<MeshFinding> = Vec::new();

        for element in self.visible() {
            let ElementKind::Mesh(mesh) = &element.kind else {
                continue;
            };
            for face in mesh.faces.values() {
                let Some(observed) = self.check_mesh_face(mesh, face) else {
                    continue;
                };
                match findings.iter_mut().find(|f| f.mesh == element.id) {
                    Some(finding) => finding.count += 1,
                    None => findings.push(MeshFinding {
                        mesh: element.id,
                        name: element.name.clone(),
                        count: 1,
                        observed,
                    }),
                }
            }
        }

        findings
            .into_iter()
            .map(|finding| {
                let others = finding.count - 1;
                let suffix = match others {
                    0 => String::new(),
                    1 => " (+1 other face)".to_string(),
                    n => format!(" (+{n} other faces)"),
                };
                Issue::new(
                    format!("{}{}", finding.name, suffix),
                    finding.observed,
                    self.expected(),
                )
            })
            .collect()
    }

    /// Check one mesh face, returning the observed description on mismatch
    ///
    /// Sizes are matched by magnitude, largest with largest, so a UV map
    /// whose axes are swapped relative to the world passes.
    fn check_mesh_face(&self, mesh: &MeshElement, face: &MeshFace) -> Option<String> {
        if face.vertices.is_empty() {
            return None;
        }
        let texture = face.texture.and_then(|id| self.scene.texture(id))?;
        let positions = mesh.face_positions(face)?;
        let uvs = face.uv_coords()?;

        let world = in_plane_extents(&positions)?;

        let (scale_u, scale_v) = texture.texel_scale();
        let (span_u, span_v) = uv_spans(&uvs);
        let actual = sorted_desc(span_u * scale_u, span_v * scale_v);
        let needed = sorted_desc(
            required_pixels(world.0, self.config.density),
            required_pixels(world.1, self.config.density),
        );

        if self.exceeds(actual.0, needed.0) || self.exceeds(actual.1, needed.1) {
            Some(format!(
                "{:.1}x{:.1} pixels (need {:.1}x{:.1})",
                actual.0, actual.1, needed.0, needed.1
            ))
        } else {
            None
        }
    }
}

fn shape_issue(element: &Element) -> Option<Issue> {
    let issue = match &element.kind {
        ElementKind::Cube(cube) if cube.zero_extent_count() > 1 => {
            let size = cube.size();
            Issue::new(
                &element.name,
                format!(
                    "Invalid shape (dimensions: {:.2}x{:.2}x{:.2})",
                    size.x, size.y, size.z
                ),
                "Must be a box or plane",
            )
        }
        ElementKind::Mesh(mesh) if !is_cuboid_or_plane(mesh) => Issue::new(
            &element.name,
            format!("Invalid mesh shape ({} vertices)", mesh.vertex_count()),
            "Must be a cuboid or plane",
        ),
        ElementKind::Other { kind } => Issue::new(
            &element.name,
            format!("Invalid element type: {kind}"),
            "Must be a cube or mesh cuboid/plane",
        ),
        _ => return None,
    };
    tracing::debug!("Shape issue on '{}': {}", element.name, issue.observed);
    Some(issue)
}

/// Two largest world extents of a polygon, ignoring thickness axes
fn in_plane_extents(positions: &[Vec3]) -> Option<(f32, f32)> {
    let min = positions.iter().copied().reduce(Vec3::min)?;
    let max = positions.iter().copied().reduce(Vec3::max)?;
    let mut extents: Vec<f32> = (max - min)
        .to_array()
        .into_iter()
        .filter(|d| *d > MIN_FACE_EXTENT)
        .collect();
    extents.sort_by(|a, b| b.total_cmp(a));
    match extents[..] {
        [a, b, ..] => Some((a, b)),
        _ => None,
    }
}

/// (u, v) bounding spans of a set of UV coordinates
fn uv_spans(uvs: &[[f32; 2]]) -> (f32, f32) {
    let span = |axis: usize| {
        let (lo, hi) = uvs
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), uv| (lo.min(uv[axis]), hi.max(uv[axis])));
        hi - lo
    };
    (span(0), span(1))
}

fn sorted_desc(a: f32, b: f32) -> (f32, f32) {
    if a >= b { (a, b) } else { (b, a) }
}
