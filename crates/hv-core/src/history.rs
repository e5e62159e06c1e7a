//! Undo history for scene edits
//!
//! Each committed edit is stored as the ordered list of element
//! insertions and removals it performed, so it can be reverted and
//! reapplied exactly.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// A single element-level change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditOp {
    /// Element inserted at `index`
    Added { index: usize, element: Element },
    /// Element removed from `index`
    Removed { index: usize, element: Element },
}

impl EditOp {
    /// The operation that undoes this one
    pub fn inverse(&self) -> EditOp {
        match self {
            EditOp::Added { index, element } => EditOp::Removed {
                index: *index,
                element: element.clone(),
            },
            EditOp::Removed { index, element } => EditOp::Added {
                index: *index,
                element: element.clone(),
            },
        }
    }

    /// Apply this operation to an element list
    pub fn apply(&self, elements: &mut Vec<Element>) {
        match self {
            EditOp::Added { index, element } => {
                let index = (*index).min(elements.len());
                elements.insert(index, element.clone());
            }
            EditOp::Removed { index, element } => {
                let position = elements
                    .get(*index)
                    .filter(|e| e.id == element.id)
                    .map(|_| *index)
                    .or_else(|| elements.iter().position(|e| e.id == element.id));
                if let Some(position) = position {
                    elements.remove(position);
                }
            }
        }
    }
}

/// A committed edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditEntry {
    pub label: String,
    pub ops: Vec<EditOp>,
}

impl EditEntry {
    pub fn new(label: impl Into<String>, ops: Vec<EditOp>) -> Self {
        Self {
            label: label.into(),
            ops,
        }
    }

    /// Revert the entry, last operation first
    pub fn revert(&self, elements: &mut Vec<Element>) {
        for op in self.ops.iter().rev() {
            op.inverse().apply(elements);
        }
    }

    /// Reapply the entry in original order
    pub fn reapply(&self, elements: &mut Vec<Element>) {
        for op in &self.ops {
            op.apply(elements);
        }
    }
}

/// Linear undo/redo stack
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: Vec<EditEntry>,
    /// Number of entries currently applied
    position: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a new entry, discarding anything that was undone
    pub fn push(&mut self, entry: EditEntry) {
        self.entries.truncate(self.position);
        self.entries.push(entry);
        self.position = self.entries.len();
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Step back, returning the entry to revert
    pub fn undo(&mut self) -> Option<&EditEntry> {
        if !self.can_undo() {
            return None;
        }
        self.position -= 1;
        self.entries.get(self.position)
    }

    /// Step forward, returning the entry to reapply
    pub fn redo(&mut self) -> Option<&EditEntry> {
        if !self.can_redo() {
            return None;
        }
        self.position += 1;
        self.entries.get(self.position - 1)
    }

    /// Label of the entry the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[EditEntry] {
        &self.entries
    }
}
