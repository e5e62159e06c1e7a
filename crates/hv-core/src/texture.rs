//! Texture metadata used for texel scale computation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_TEXTURE_SIZE, DEFAULT_UV_SIZE};

/// A texture referenced by element faces
///
/// Zero sizes are treated as unset, matching how project files leave
/// them blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub id: Uuid,
    pub name: String,
    /// Pixel width
    #[serde(default)]
    pub width: u32,
    /// Pixel height
    #[serde(default)]
    pub height: u32,
    /// UV-space reference width
    #[serde(default)]
    pub uv_width: Option<f32>,
    /// UV-space reference height
    #[serde(default)]
    pub uv_height: Option<f32>,
}

impl Texture {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            uv_width: None,
            uv_height: None,
        }
    }

    pub fn with_uv_size(mut self, uv_width: f32, uv_height: f32) -> Self {
        self.uv_width = Some(uv_width);
        self.uv_height = Some(uv_height);
        self
    }

    /// Pixels per UV unit along (u, v)
    pub fn texel_scale(&self) -> (f32, f32) {
        (
            axis_scale(self.width, self.uv_width),
            axis_scale(self.height, self.uv_height),
        )
    }
}

fn axis_scale(pixels: u32, uv: Option<f32>) -> f32 {
    let pixels = (pixels > 0).then_some(pixels as f32);
    let uv = uv
        .filter(|uv| *uv != 0.0)
        .or(pixels)
        .unwrap_or(DEFAULT_UV_SIZE);
    pixels.unwrap_or(DEFAULT_TEXTURE_SIZE) / uv
}
