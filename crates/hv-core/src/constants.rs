//! Global constants for hv-core

/// World units covered by one block; densities are expressed per this span
pub const UNITS_PER_BLOCK: f32 = 16.0;

/// UV-space size assumed when a texture declares neither UV nor pixel size
pub const DEFAULT_UV_SIZE: f32 = 16.0;

/// Pixel size assumed when a texture does not declare its dimensions
pub const DEFAULT_TEXTURE_SIZE: f32 = 128.0;

/// Allowed absolute difference between actual and required pixels, per axis
pub const PIXEL_TOLERANCE: f32 = 1.0;

/// 8-vertex cuboid test rounds coordinates to 3 decimals (multiply, round)
pub const CUBOID_ROUND_FACTOR: f32 = 1000.0;

/// Mesh face extents at or below this are treated as thickness, not a face side
pub const MIN_FACE_EXTENT: f32 = 0.01;

/// Dominant normal component below this leaves a face unresolved
pub const MIN_NORMAL_COMPONENT: f32 = 0.5;

/// |sin(pitch)| above this is handled as gimbal lock
pub const GIMBAL_LOCK_THRESHOLD: f32 = 0.99999;

/// Number of issues listed verbatim in a report
pub const MAX_LISTED_ISSUES: usize = 8;

/// Density required for entity and item models (pixels per block)
pub const ENTITY_ITEM_DENSITY: u32 = 64;

/// Density required for block models (pixels per block)
pub const BLOCK_DENSITY: u32 = 32;
