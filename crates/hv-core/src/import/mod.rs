//! Model import
//!
//! Reads the editor's JSON project format (`.bbmodel`) or this crate's
//! own RON model files into a [`Model`].

mod bbmodel;

use std::path::Path;

use crate::model::Model;

pub use bbmodel::{import_bbmodel, import_bbmodel_str};

/// Errors that can occur during model import
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse project JSON: {0}")]
    Json(String),

    #[error("Invalid element '{name}': {reason}")]
    InvalidElement { name: String, reason: String },

    #[error("Failed to load model: {0}")]
    Model(String),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
}

/// Model file format, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Editor project (JSON)
    Bbmodel,
    /// Native model file
    Ron,
    Unknown,
}

impl ModelFormat {
    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("bbmodel") | Some("json") => ModelFormat::Bbmodel,
            Some("ron") => ModelFormat::Ron,
            _ => ModelFormat::Unknown,
        }
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Bbmodel => "Blockbench project",
            ModelFormat::Ron => "RON model",
            ModelFormat::Unknown => "Unknown",
        }
    }
}

/// Load a model in any supported format
pub fn import_model(path: impl AsRef<Path>) -> Result<Model, ImportError> {
    let path = path.as_ref();
    match ModelFormat::from_path(path) {
        ModelFormat::Bbmodel => import_bbmodel(path),
        ModelFormat::Ron => Model::load(path).map_err(|e| ImportError::Model(e.to_string())),
        ModelFormat::Unknown => Err(ImportError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ModelFormat::from_path(Path::new("a/model.bbmodel")),
            ModelFormat::Bbmodel
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("model.JSON")),
            ModelFormat::Bbmodel
        );
        assert_eq!(ModelFormat::from_path(Path::new("model.ron")), ModelFormat::Ron);
        assert_eq!(ModelFormat::from_path(Path::new("model")), ModelFormat::Unknown);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = import_model("model.obj");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "obj"));
    }

    #[test]
    fn test_import_ron_file() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let path = temp.path().join("m.ron");
        Model::new("saved").save(&path).unwrap();

        let model = import_model(&path).unwrap();
        assert_eq!(model.name, "saved");
    }
}
