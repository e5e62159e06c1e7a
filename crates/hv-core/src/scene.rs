//! Host scene access
//!
//! The verifier only reads through [`SceneSource`]; the converter writes
//! through [`SceneEditor`], always inside an [`EditScope`].

use uuid::Uuid;

use crate::element::Element;
use crate::texture::Texture;

/// Read access to the host's model elements and textures
pub trait SceneSource {
    /// All top-level elements in outliner order
    fn elements(&self) -> &[Element];

    /// Look up a texture by id
    fn texture(&self, id: Uuid) -> Option<&Texture>;

    /// Look up an element by id
    fn element(&self, id: Uuid) -> Option<&Element> {
        self.elements().iter().find(|e| e.id == id)
    }
}

/// Mutation primitives bracketed by an undoable edit
pub trait SceneEditor: SceneSource {
    /// Open an edit touching `affected`
    fn begin_edit(&mut self, affected: &[Uuid]);

    /// Close the open edit and record it under `label`
    fn commit_edit(&mut self, label: &str, affected: &[Uuid]);

    /// Close the open edit and revert everything done since it began
    fn abort_edit(&mut self);

    /// Insert an element under `parent` (None = root), returning its id
    fn add_element(&mut self, element: Element, parent: Option<Uuid>) -> Uuid;

    /// Remove an element, returning it if it existed
    fn remove_element(&mut self, id: Uuid) -> Option<Element>;
}

/// Scoped edit over a [`SceneEditor`]
///
/// The edit begins when the scope is created and is committed exactly once:
/// by [`EditScope::commit`], or when the scope is dropped. A scope dropped
/// while unwinding from a panic aborts instead.
pub struct EditScope<'a, E: SceneEditor + ?Sized> {
    editor: &'a mut E,
    label: String,
    created: Vec<Uuid>,
    removed: Vec<Uuid>,
    finished: bool,
}

impl<'a, E: SceneEditor + ?Sized> EditScope<'a, E> {
    /// Begin an edit on `editor` touching `affected`
    pub fn begin(editor: &'a mut E, label: impl Into<String>, affected: &[Uuid]) -> Self {
        editor.begin_edit(affected);
        Self {
            editor,
            label: label.into(),
            created: Vec::new(),
            removed: Vec::new(),
            finished: false,
        }
    }

    /// Read access to the scene being edited
    pub fn scene(&self) -> &E {
        &*self.editor
    }

    pub fn add_element(&mut self, element: Element, parent: Option<Uuid>) -> Uuid {
        let id = self.editor.add_element(element, parent);
        self.created.push(id);
        id
    }

    pub fn remove_element(&mut self, id: Uuid) -> Option<Element> {
        let removed = self.editor.remove_element(id)?;
        self.removed.push(id);
        Some(removed)
    }

    /// Ids created so far in this scope
    pub fn created(&self) -> &[Uuid] {
        &self.created
    }

    /// Ids removed so far in this scope
    pub fn removed(&self) -> &[Uuid] {
        &self.removed
    }

    /// Commit the edit now
    pub fn commit(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if std::thread::panicking() {
            tracing::warn!("Aborting edit '{}' during unwind", self.label);
            self.editor.abort_edit();
            return;
        }

        let affected: Vec<Uuid> = self
            .created
            .iter()
            .chain(self.removed.iter())
            .copied()
            .collect();
        self.editor.commit_edit(&self.label, &affected);
    }
}

impl<E: SceneEditor + ?Sized> Drop for EditScope<'_, E> {
    fn drop(&mut self) {
        self.finish();
    }
}
