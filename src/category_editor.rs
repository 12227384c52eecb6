//! Working copy for category management.
//!
//! The editor holds a copy of the category list plus the reassignments its
//! deletions imply. Snippets stay in the live collection, so snippet changes
//! made while an editor is open are kept. Nothing reaches the session (or
//! disk) until the editor is handed back through
//! [`Session::commit_categories`](crate::session::Session::commit_categories);
//! dropping the editor discards every change.

use std::collections::HashMap;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::category::{is_protected_id, normalize_icon, normalize_id};
use crate::models::{Category, Collection, Snippet};

/// What deleting a category would do, computed before anything changes so the
/// caller can confirm the affected snippet count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub category_id: String,
    pub affected: usize,
    pub reassign_to: String,
}

/// Snippets filed under `from` move to `to` when the edits are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct CategoryEditor {
    categories: Vec<Category>,
    /// Snippet count per category id as of the last edit.
    usage: HashMap<String, usize>,
    reassignments: Vec<Reassignment>,
}

impl CategoryEditor {
    pub(crate) fn new(collection: &Collection) -> Self {
        let mut usage = HashMap::new();
        for snippet in &collection.snippets {
            *usage.entry(snippet.category.clone()).or_insert(0) += 1;
        }

        Self {
            categories: collection.categories.clone(),
            usage,
            reassignments: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn reassignments(&self) -> &[Reassignment] {
        &self.reassignments
    }

    fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Adds a category. Returns the normalized id.
    pub fn create(&mut self, icon: &str, id: &str, name: &str) -> Result<String> {
        let id = normalize_id(id);
        let name = name.trim();

        if id.is_empty() || name.is_empty() {
            return Err(Error::validation("Category id and name are required"));
        }
        if self.has_category(&id) {
            return Err(Error::validation(format!("Category id already exists: {}", id)));
        }

        self.categories
            .push(Category::new(id.clone(), name, normalize_icon(icon)));
        info!(category = %id, "category added");
        Ok(id)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Category name cannot be empty"));
        }

        self.category_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_icon(&mut self, id: &str, icon: &str) -> Result<()> {
        self.category_mut(id)?.icon = normalize_icon(icon);
        Ok(())
    }

    /// Checks that `id` may be deleted and works out where its snippets go.
    pub fn plan_delete(&self, id: &str) -> Result<DeletePlan> {
        if is_protected_id(id) {
            return Err(Error::validation(format!(
                "Default category cannot be deleted: {}",
                id
            )));
        }
        if !self.has_category(id) {
            return Err(Error::not_found(format!("Category not found: {}", id)));
        }

        let reassign_to = self
            .categories
            .iter()
            .find(|c| c.id != id)
            .map(|c| c.id.clone())
            .ok_or_else(|| Error::validation("The last remaining category cannot be deleted"))?;

        Ok(DeletePlan {
            category_id: id.to_string(),
            affected: self.usage.get(id).copied().unwrap_or(0),
            reassign_to,
        })
    }

    /// Applies a plan from [`plan_delete`](Self::plan_delete). The plan is
    /// recomputed so a stale one cannot reassign to a category that is gone.
    /// Returns the number of snippets that will be reassigned.
    pub fn delete(&mut self, plan: &DeletePlan) -> Result<usize> {
        let current = self.plan_delete(&plan.category_id)?;

        let moved = self.usage.remove(&current.category_id).unwrap_or(0);
        *self.usage.entry(current.reassign_to.clone()).or_insert(0) += moved;
        self.categories.retain(|c| c.id != current.category_id);
        self.reassignments.push(Reassignment {
            from: current.category_id.clone(),
            to: current.reassign_to.clone(),
        });

        info!(
            category = %current.category_id,
            reassigned = moved,
            reassigned_to = %current.reassign_to,
            "category deleted"
        );
        Ok(moved)
    }

    /// Hands back the edited category list, applying the pending
    /// reassignments to `snippets` in the order the deletes happened.
    pub(crate) fn apply(self, snippets: &mut [Snippet]) -> Vec<Category> {
        for reassignment in &self.reassignments {
            for snippet in snippets
                .iter_mut()
                .filter(|s| s.category == reassignment.from)
            {
                snippet.category = reassignment.to.clone();
            }
        }
        self.categories
    }

    fn category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("Category not found: {}", id)))
    }
}
