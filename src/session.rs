//! The snippet collection manager.
//!
//! A [`Session`] owns the in-memory collection together with the view context
//! (category filter, search query, snippet being edited). Every successful
//! mutation is followed by a full-document save through the session's
//! [`DocumentStore`]. A failed save is reported to the caller, but the
//! in-memory change is kept.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, error, info, warn};

use crate::category_editor::CategoryEditor;
use crate::error::{Error, Result};
use crate::models::{
    Collection, DocumentStore, Priority, Snippet, SnippetDraft, export_collection,
    import_collection,
};
use crate::ordering;
use crate::search::{CategoryFilter, filter_snippets};
use crate::shell::Shell;

/// The launchable bindings a snippet can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction {
    Url,
    File,
    Folder,
    Executable,
}

impl LaunchAction {
    fn binding(self, snippet: &Snippet) -> Option<&str> {
        match self {
            LaunchAction::Url => snippet.url(),
            LaunchAction::File => snippet.file_path(),
            LaunchAction::Folder => snippet.folder_path(),
            LaunchAction::Executable => snippet.exe_path(),
        }
    }
}

impl fmt::Display for LaunchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LaunchAction::Url => "url",
            LaunchAction::File => "file",
            LaunchAction::Folder => "folder",
            LaunchAction::Executable => "executable",
        };
        f.write_str(label)
    }
}

impl FromStr for LaunchAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" | "link" => Ok(LaunchAction::Url),
            "file" => Ok(LaunchAction::File),
            "folder" | "dir" => Ok(LaunchAction::Folder),
            "exe" | "executable" | "run" => Ok(LaunchAction::Executable),
            other => Err(format!("unknown action: {}", other)),
        }
    }
}

#[derive(Debug)]
pub struct Session<S: DocumentStore> {
    collection: Collection,
    store: S,
    pub filter: CategoryFilter,
    pub query: String,
    editing_id: Option<String>,
}

impl<S: DocumentStore> Session<S> {
    /// Loads the collection from `store`.
    ///
    /// A missing document is replaced with the seed collection and saved. A
    /// document with missing, empty or legacy categories gets the default
    /// categories and is saved. An unreadable document is logged and the seed
    /// is used in memory only, so the broken file stays on disk untouched.
    pub fn open(store: S) -> Self {
        let (collection, needs_save) = match store.load() {
            Ok(Some(document)) => {
                let (collection, upgraded) = document.into_collection();
                if upgraded {
                    info!("stored categories missing or in legacy format; using defaults");
                }
                (collection, upgraded)
            }
            Ok(None) => {
                info!("no stored document; starting from the seed collection");
                (Collection::seed(), true)
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "failed to load document; using seed data");
                (Collection::seed(), false)
            }
        };

        let session = Self::with_collection(store, collection);
        if needs_save {
            if let Err(e) = session.persist() {
                warn!(error = %e, "initial save failed");
            }
        }
        session
    }

    /// Wraps an existing collection without touching the store.
    pub fn with_collection(store: S, collection: Collection) -> Self {
        Self {
            collection,
            store,
            filter: CategoryFilter::All,
            query: String::new(),
            editing_id: None,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.collection).map_err(|e| {
            error!(error = %format!("{:#}", e), "failed to save document");
            Error::Persistence(e)
        })
    }

    /// Snippets matching the current filter and query, in canonical order.
    pub fn visible_snippets(&self) -> Vec<&Snippet> {
        ordering::sorted(filter_snippets(
            &self.collection.snippets,
            &self.filter,
            &self.query,
        ))
    }

    /// Finds a snippet by id, then by exact name, then by partial name.
    /// Name matching ignores case.
    pub fn resolve(&self, name_or_id: &str) -> Option<&Snippet> {
        let snippets = &self.collection.snippets;
        if let Some(snippet) = self.collection.snippet(name_or_id) {
            return Some(snippet);
        }

        let name = name_or_id.to_lowercase();
        snippets
            .iter()
            .find(|s| s.name.to_lowercase() == name)
            .or_else(|| {
                ordering::sorted(snippets)
                    .into_iter()
                    .find(|s| s.name.to_lowercase().contains(&name))
            })
    }

    fn validate(&self, draft: &SnippetDraft, current_category: Option<&str>) -> Result<()> {
        if draft.name.is_empty() || draft.content.is_empty() {
            return Err(Error::validation("Snippet name and content are required"));
        }

        let unchanged = current_category == Some(draft.category.as_str());
        if !unchanged && !self.collection.has_category(&draft.category) {
            return Err(Error::validation(format!(
                "Unknown category: {}",
                draft.category
            )));
        }
        Ok(())
    }

    /// Adds a snippet at the front of the collection and saves. Returns its id.
    pub fn create_snippet(&mut self, draft: SnippetDraft) -> Result<String> {
        let draft = draft.normalized();
        self.validate(&draft, None)?;

        let id = self.collection.fresh_snippet_id();
        self.collection
            .snippets
            .insert(0, Snippet::new(id.clone(), draft));
        info!(snippet = %id, "snippet added");

        self.persist()?;
        Ok(id)
    }

    /// Replaces the editable fields of `id`. Returns false, without saving,
    /// when no such snippet exists.
    pub fn update_snippet(&mut self, id: &str, draft: SnippetDraft) -> Result<bool> {
        let draft = draft.normalized();
        let Some(current) = self.collection.snippet(id) else {
            debug!(snippet = id, "update skipped; unknown id");
            return Ok(false);
        };
        self.validate(&draft, Some(&current.category))?;

        if let Some(snippet) = self.collection.snippet_mut(id) {
            snippet.apply(draft);
        }
        info!(snippet = id, "snippet updated");

        self.persist()?;
        Ok(true)
    }

    /// Removes `id`. Callers are expected to have confirmed with the user.
    pub fn delete_snippet(&mut self, id: &str) -> Result<bool> {
        let before = self.collection.snippets.len();
        self.collection.snippets.retain(|s| s.id != id);
        if self.collection.snippets.len() == before {
            debug!(snippet = id, "delete skipped; unknown id");
            return Ok(false);
        }

        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        info!(snippet = id, "snippet deleted");

        self.persist()?;
        Ok(true)
    }

    /// Starts editing `id` and returns its current fields.
    pub fn begin_edit(&mut self, id: &str) -> Option<SnippetDraft> {
        let draft = self.collection.snippet(id)?.to_draft();
        self.editing_id = Some(id.to_string());
        Some(draft)
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Form submission: updates the snippet being edited, or creates a new
    /// one when no edit is in progress. Returns the snippet id.
    pub fn submit(&mut self, draft: SnippetDraft) -> Result<String> {
        match self.editing_id.clone() {
            Some(id) => {
                if !self.update_snippet(&id, draft)? {
                    self.editing_id = None;
                    return Err(Error::not_found(format!("Snippet not found: {}", id)));
                }
                self.editing_id = None;
                Ok(id)
            }
            None => self.create_snippet(draft),
        }
    }

    /// Moves a snippet to another priority tier and reindexes.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<bool> {
        let Some(snippet) = self.collection.snippet_mut(id) else {
            return Ok(false);
        };
        snippet.priority = Some(priority);
        ordering::reorder(&mut self.collection.snippets);
        info!(snippet = id, %priority, "priority changed");

        self.persist()?;
        Ok(true)
    }

    /// Drag-and-drop of `dragged_id` onto `target_id`; see [`ordering::drag_reorder`].
    pub fn move_snippet(&mut self, dragged_id: &str, target_id: &str) -> Result<bool> {
        if !ordering::drag_reorder(&mut self.collection.snippets, dragged_id, target_id) {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Copies the snippet's content to the clipboard.
    pub fn copy_content(&self, id: &str, shell: &impl Shell) -> Result<()> {
        let snippet = self
            .collection
            .snippet(id)
            .ok_or_else(|| Error::not_found(format!("Snippet not found: {}", id)))?;
        shell.copy_text(&snippet.content)
    }

    /// Opens the binding of `action` on snippet `id`.
    pub fn launch(&self, id: &str, action: LaunchAction, shell: &impl Shell) -> Result<()> {
        let snippet = self
            .collection
            .snippet(id)
            .ok_or_else(|| Error::not_found(format!("Snippet not found: {}", id)))?;
        let target = action.binding(snippet).ok_or_else(|| {
            Error::not_found(format!("Snippet '{}' has no {} bound", snippet.name, action))
        })?;

        debug!(snippet = id, %action, binding = target, "launching");
        match action {
            LaunchAction::Url => shell.open_url(target),
            LaunchAction::File => shell.open_file(target),
            LaunchAction::Folder => shell.open_folder(target),
            LaunchAction::Executable => shell.launch_executable(target),
        }
    }

    /// Starts a category editing pass on a working copy.
    pub fn edit_categories(&self) -> CategoryEditor {
        CategoryEditor::new(&self.collection)
    }

    /// Installs the editor's category list, moves snippets out of deleted
    /// categories, and saves.
    pub fn commit_categories(&mut self, editor: CategoryEditor) -> Result<()> {
        self.collection.categories = editor.apply(&mut self.collection.snippets);
        if let CategoryFilter::Category(id) = &self.filter {
            if !self.collection.has_category(id) {
                self.filter = CategoryFilter::All;
            }
        }
        info!(count = self.collection.categories.len(), "categories saved");
        self.persist()
    }

    /// Replaces the whole collection with the contents of `path` and saves.
    /// On any error the active collection is left as it was.
    pub fn import(&mut self, path: &Path) -> Result<usize> {
        let imported = import_collection(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "import rejected");
        })?;

        let count = imported.snippets.len();
        self.collection = imported;
        self.filter = CategoryFilter::All;
        self.editing_id = None;
        info!(path = %path.display(), snippets = count, "collection imported");

        self.persist()?;
        Ok(count)
    }

    /// Writes the active collection to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        export_collection(&self.collection, path)?;
        info!(path = %path.display(), "collection exported");
        Ok(())
    }
}
