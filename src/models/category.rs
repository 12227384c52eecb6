use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Icon used when a category is created or re-iconed with a blank glyph.
pub const DEFAULT_ICON: &str = "📁";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Built-in categories, in display order. These may be relabeled but never deleted.
const DEFAULTS: [(&str, &str, &str); 9] = [
    ("skills", "Skills", "⚡"),
    ("prompts", "Prompts", "💬"),
    ("mcp-tools", "MCP Tools", "🔧"),
    ("sdk", "SDK", "📦"),
    ("api", "API", "🔌"),
    ("models", "Models", "🤖"),
    ("commands", "Commands", "⌨️"),
    ("urls", "URLs", "🔗"),
    ("text", "Text", "📝"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    pub fn is_protected(&self) -> bool {
        is_protected_id(&self.id)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

pub fn default_categories() -> Vec<Category> {
    DEFAULTS
        .iter()
        .map(|(id, name, icon)| Category::new(*id, *name, *icon))
        .collect()
}

pub fn is_protected_id(id: &str) -> bool {
    DEFAULTS.iter().any(|(default_id, _, _)| *default_id == id)
}

/// Turns user input into a category id: trimmed, lowercased, whitespace runs
/// collapsed to a single hyphen.
pub fn normalize_id(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&raw.trim().to_lowercase(), "-")
        .into_owned()
}

/// Blank icons fall back to [`DEFAULT_ICON`].
pub fn normalize_icon(raw: &str) -> String {
    let icon = raw.trim();
    if icon.is_empty() {
        DEFAULT_ICON.to_string()
    } else {
        icon.to_string()
    }
}
