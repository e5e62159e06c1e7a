//! In-memory model and its file format
//!
//! `Model` is the scene the command-line host works on: elements in
//! outliner order, textures, groups, and the undo history of edits made
//! through [`SceneEditor`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, Group};
use crate::history::{EditEntry, EditHistory, EditOp};
use crate::scene::{SceneEditor, SceneSource};
use crate::texture::Texture;

/// Serialization format for backward compatibility
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelData {
    version: u32,
    name: String,
    elements: Vec<Element>,
    textures: Vec<Texture>,
    #[serde(default)]
    groups: Vec<Group>,
}

/// A model: elements, textures and groups plus edit history
#[derive(Debug, Clone)]
pub struct Model {
    /// File format version
    pub version: u32,
    /// Model name
    pub name: String,
    elements: Vec<Element>,
    textures: Vec<Texture>,
    groups: Vec<Group>,
    /// Runtime state only - not serialized
    history: EditHistory,
    /// Operations of the currently open edit
    pending: Option<Vec<EditOp>>,
}

impl From<ModelData> for Model {
    fn from(data: ModelData) -> Self {
        Self {
            version: data.version,
            name: data.name,
            elements: data.elements,
            textures: data.textures,
            groups: data.groups,
            history: EditHistory::new(),
            pending: None,
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let data = ModelData {
            version: self.version,
            name: self.name.clone(),
            elements: self.elements.clone(),
            textures: self.textures.clone(),
            groups: self.groups.clone(),
        };
        data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = ModelData::deserialize(deserializer)?;
        Ok(Model::from(data))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("New Model")
    }
}

impl Model {
    /// Create a new empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            elements: Vec::new(),
            textures: Vec::new(),
            groups: Vec::new(),
            history: EditHistory::new(),
            pending: None,
        }
    }

    /// Create a model with all contents specified (used by import)
    pub fn with_contents(
        name: impl Into<String>,
        elements: Vec<Element>,
        textures: Vec<Texture>,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            elements,
            textures,
            groups,
            ..Self::new(name)
        }
    }

    /// Save model to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let content = self.to_bytes()?;
        std::fs::write(path, content).map_err(|e| ModelError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize model to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ModelError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load model from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModelError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ModelError::Deserialize(e.to_string()))
    }

    /// Load model from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ModelError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ModelError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ModelError::Deserialize(e.to_string()))
    }

    // ============== Content Accessors ==============

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Add a texture, returns its ID
    pub fn add_texture(&mut self, texture: Texture) -> Uuid {
        let id = texture.id;
        self.textures.push(texture);
        id
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Add a group, returns its ID
    pub fn add_group(&mut self, group: Group) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        id
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Append an element outside of any edit (not undoable)
    pub fn push_element(&mut self, element: Element) -> Uuid {
        let id = element.id;
        self.elements.push(element);
        id
    }

    pub fn element_mut(&mut self, id: Uuid) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Find an element by name
    pub fn find_by_name(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    // ============== Undo ==============

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Revert the last committed edit; false if there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                tracing::debug!("Undo '{}'", entry.label);
                entry.revert(&mut self.elements);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone edit; false if there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                tracing::debug!("Redo '{}'", entry.label);
                entry.reapply(&mut self.elements);
                true
            }
            None => false,
        }
    }

    fn record(&mut self, op: EditOp) {
        if let Some(ops) = self.pending.as_mut() {
            ops.push(op);
        }
    }
}

impl SceneSource for Model {
    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn texture(&self, id: Uuid) -> Option<&Texture> {
        self.textures.iter().find(|t| t.id == id)
    }
}

impl SceneEditor for Model {
    fn begin_edit(&mut self, affected: &[Uuid]) {
        if self.pending.is_some() {
            tracing::warn!("Edit already open, joining it");
            return;
        }
        tracing::debug!("Begin edit on {} element(s)", affected.len());
        self.pending = Some(Vec::new());
    }

    fn commit_edit(&mut self, label: &str, affected: &[Uuid]) {
        let Some(ops) = self.pending.take() else {
            tracing::warn!("Commit of '{}' without an open edit", label);
            return;
        };
        tracing::debug!("Commit edit '{}' on {} element(s)", label, affected.len());
        if !ops.is_empty() {
            self.history.push(EditEntry::new(label, ops));
        }
    }

    fn abort_edit(&mut self) {
        if let Some(ops) = self.pending.take() {
            EditEntry::new("aborted", ops).revert(&mut self.elements);
        }
    }

    fn add_element(&mut self, mut element: Element, parent: Option<Uuid>) -> Uuid {
        element.parent = parent;
        let id = element.id;
        let index = self.elements.len();
        self.elements.push(element.clone());
        self.record(EditOp::Added { index, element });
        id
    }

    fn remove_element(&mut self, id: Uuid) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        let element = self.elements.remove(index);
        self.record(EditOp::Removed {
            index,
            element: element.clone(),
        });
        Some(element)
    }
}

/// Model-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
