//! Hytale Verifier core
//!
//! This crate contains the model checks and conversions behind the verifier:
//! - Element: cubes, meshes and the data they carry
//! - Geometry: cuboid classification, face normals, rotation conversion
//! - Verify: texel density verification and reporting
//! - Convert: lossless mesh-to-cube conversion inside one edit
//! - Model: in-memory scene with undo history and file persistence

pub mod config;
pub mod constants;
pub mod convert;
pub mod element;
pub mod geometry;
pub mod history;
pub mod import;
pub mod model;
pub mod scene;
pub mod texture;
pub mod verify;

pub use config::*;
pub use constants::*;
pub use convert::*;
pub use element::*;
pub use geometry::*;
pub use history::*;
pub use import::*;
pub use model::*;
pub use scene::*;
pub use texture::*;
pub use verify::*;
