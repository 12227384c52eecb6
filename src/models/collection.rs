use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::category::{Category, default_categories};
use crate::models::snippet::Snippet;

/// Everything that is persisted: the unit of load and save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub snippets: Vec<Snippet>,
    pub categories: Vec<Category>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            snippets: Vec::new(),
            categories: default_categories(),
        }
    }
}

/// Categories as found on disk. Older documents stored a plain list of names;
/// any other shape is a malformed document, not a legacy one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredCategories {
    Structured(Vec<Category>),
    Legacy(Vec<String>),
}

/// A document as read from a store or an import file, before upgrade.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredDocument {
    pub snippets: Vec<Snippet>,
    #[serde(default)]
    pub categories: Option<StoredCategories>,
}

impl StoredDocument {
    /// True when the categories need replacing with the default set:
    /// missing, empty, or in the legacy string format.
    pub fn needs_category_upgrade(&self) -> bool {
        match &self.categories {
            Some(StoredCategories::Structured(categories)) => categories.is_empty(),
            Some(StoredCategories::Legacy(_)) | None => true,
        }
    }

    /// Converts into a live collection. The flag reports whether the default
    /// categories were substituted, in which case the caller should save.
    pub fn into_collection(self) -> (Collection, bool) {
        let upgraded = self.needs_category_upgrade();
        let categories = match self.categories {
            Some(StoredCategories::Structured(categories)) if !categories.is_empty() => categories,
            _ => default_categories(),
        };

        (
            Collection {
                snippets: self.snippets,
                categories,
            },
            upgraded,
        )
    }
}

impl Collection {
    /// Default categories plus a handful of example snippets, used when no
    /// document exists yet or the stored one is unreadable.
    pub fn seed() -> Self {
        let now = Utc::now();
        let example = |id: &str, name: &str, content: &str, category: &str, description: &str| {
            Snippet {
                id: id.to_string(),
                name: name.to_string(),
                content: content.to_string(),
                category: category.to_string(),
                description: Some(description.to_string()),
                url: None,
                file_path: None,
                folder_path: None,
                exe_path: None,
                priority: None,
                order: None,
                created_at: now,
                updated_at: None,
            }
        };

        Self {
            snippets: vec![
                example(
                    "1",
                    "claude-opus-4.5",
                    "claude-opus-4-5-20251101",
                    "models",
                    "Claude Opus 4.5 model id",
                ),
                example(
                    "2",
                    "claude-sonnet-4",
                    "claude-sonnet-4-20250514",
                    "models",
                    "Claude Sonnet 4 model id",
                ),
                example(
                    "3",
                    "claude-haiku",
                    "claude-haiku-4-20250514",
                    "models",
                    "Claude Haiku model id",
                ),
                example(
                    "4",
                    "command-notebook",
                    "/command-notebook",
                    "skills",
                    "Command notebook skill",
                ),
                example(
                    "5",
                    "anthropic-docs",
                    "https://docs.anthropic.com",
                    "urls",
                    "Anthropic documentation",
                ),
                example(
                    "6",
                    "claude-code-guide",
                    "https://docs.anthropic.com/en/docs/claude-code",
                    "urls",
                    "Claude Code guide",
                ),
            ],
            categories: default_categories(),
        }
    }

    pub fn snippet(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    pub fn snippet_mut(&mut self, id: &str) -> Option<&mut Snippet> {
        self.snippets.iter_mut().find(|s| s.id == id)
    }

    pub fn contains_snippet(&self, id: &str) -> bool {
        self.snippets.iter().any(|s| s.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.category(id).is_some()
    }

    /// Display name for a category id; dangling references show the raw id.
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.category(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    pub fn count_in_category(&self, id: &str) -> usize {
        self.snippets.iter().filter(|s| s.category == id).count()
    }

    /// Returns an id not used by any snippet in the collection.
    pub fn fresh_snippet_id(&self) -> String {
        loop {
            let id = Snippet::generate_id();
            if !self.contains_snippet(&id) {
                return id;
            }
        }
    }
}
