//! Verification settings
//!
//! Settings can be serialized and loaded from RON files; the two presets
//! cover the art-style rules for entities/items and blocks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{BLOCK_DENSITY, ENTITY_ITEM_DENSITY, MAX_LISTED_ISSUES, PIXEL_TOLERANCE};

/// Density verification configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyConfig {
    /// Required texture pixels per 16 world units
    pub density: u32,
    /// Model category shown in the report
    pub label: String,
    /// Allowed absolute pixel difference per axis
    #[serde(default = "default_tolerance")]
    pub tolerance_px: f32,
    /// Issues listed verbatim before the remainder is summarized
    #[serde(default = "default_max_listed")]
    pub max_listed_issues: usize,
}

fn default_tolerance() -> f32 {
    PIXEL_TOLERANCE
}

fn default_max_listed() -> usize {
    MAX_LISTED_ISSUES
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self::entity_item()
    }
}

impl VerifyConfig {
    /// Create a config with the given density and label
    pub fn new(density: u32, label: impl Into<String>) -> Self {
        Self {
            density,
            label: label.into(),
            tolerance_px: PIXEL_TOLERANCE,
            max_listed_issues: MAX_LISTED_ISSUES,
        }
    }

    /// Entity and item models (64px density)
    pub fn entity_item() -> Self {
        Self::new(ENTITY_ITEM_DENSITY, "Entity/Item")
    }

    /// Block models (32px density)
    pub fn block() -> Self {
        Self::new(BLOCK_DENSITY, "Block")
    }

    /// Load a config from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

/// Config-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
