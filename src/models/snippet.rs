use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Primary sort key of a snippet. Absent on disk means `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Tier rank used by the canonical comparator; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A reusable text fragment plus its optional launch bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub name: String,
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exe_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_order"
    )]
    pub order: Option<f64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Whole orders are written as integers so the document matches what other
// tools produced for the same file.
fn serialize_order<S: Serializer>(order: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match order {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*value as i64)
        }
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_none(),
    }
}

/// Editable fields of a snippet, as submitted from a form or the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetDraft {
    pub name: String,
    pub content: String,
    pub category: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub file_path: Option<String>,
    pub folder_path: Option<String>,
    pub exe_path: Option<String>,
}

impl SnippetDraft {
    pub fn new(name: impl Into<String>, content: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Trims every field and turns blank optionals into `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
            category: self.category.trim().to_string(),
            description: non_blank(self.description),
            url: non_blank(self.url),
            file_path: non_blank(self.file_path),
            folder_path: non_blank(self.folder_path),
            exe_path: non_blank(self.exe_path),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Snippet {
    /// Builds a snippet from a normalized draft. Priority and order are left
    /// unset so the comparator defaults apply until the next reindex.
    pub fn new(id: String, draft: SnippetDraft) -> Self {
        Self {
            id,
            name: draft.name,
            content: draft.content,
            category: draft.category,
            description: draft.description,
            url: draft.url,
            file_path: draft.file_path,
            folder_path: draft.folder_path,
            exe_path: draft.exe_path,
            priority: None,
            order: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Time-ordered id; callers check it against the collection.
    pub fn generate_id() -> String {
        Uuid::now_v7().to_string()
    }

    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    pub fn order(&self) -> f64 {
        self.order.unwrap_or(0.0)
    }

    /// Replaces the editable fields, keeping id, creation time and ordering.
    pub fn apply(&mut self, draft: SnippetDraft) {
        self.name = draft.name;
        self.content = draft.content;
        self.category = draft.category;
        self.description = draft.description;
        self.url = draft.url;
        self.file_path = draft.file_path;
        self.folder_path = draft.folder_path;
        self.exe_path = draft.exe_path;
        self.updated_at = Some(Utc::now());
    }

    pub fn to_draft(&self) -> SnippetDraft {
        SnippetDraft {
            name: self.name.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            file_path: self.file_path.clone(),
            folder_path: self.folder_path.clone(),
            exe_path: self.exe_path.clone(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        present(&self.url)
    }

    pub fn file_path(&self) -> Option<&str> {
        present(&self.file_path)
    }

    pub fn folder_path(&self) -> Option<&str> {
        present(&self.folder_path)
    }

    pub fn exe_path(&self) -> Option<&str> {
        present(&self.exe_path)
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_priority_and_order_use_defaults() {
        let snippet: Snippet = serde_json::from_value(json!({
            "id": "1",
            "name": "claude-haiku",
            "content": "claude-haiku-4-20250514",
            "category": "models",
            "createdAt": "2025-05-14T08:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(snippet.priority(), Priority::Medium);
        assert_eq!(snippet.order(), 0.0);
        assert!(snippet.url().is_none());
    }

    #[test]
    fn whole_orders_serialize_as_integers() {
        let mut snippet = Snippet::new("a".into(), SnippetDraft::new("a", "b", "text"));
        snippet.order = Some(3.0);
        let value = serde_json::to_value(&snippet).unwrap();
        assert_eq!(value["order"], json!(3));

        snippet.order = Some(1.5);
        let value = serde_json::to_value(&snippet).unwrap();
        assert_eq!(value["order"], json!(1.5));
    }

    #[test]
    fn unset_fields_are_omitted_and_keys_are_camel_case() {
        let mut draft = SnippetDraft::new("docs", "https://docs.rs", "urls");
        draft.file_path = Some("/tmp/notes.txt".into());
        let snippet = Snippet::new("42".into(), draft);
        let value = serde_json::to_value(&snippet).unwrap();

        assert_eq!(value["filePath"], json!("/tmp/notes.txt"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("priority").is_none());
        assert!(value.get("order").is_none());
        assert!(value.get("exePath").is_none());
    }

    #[test]
    fn blank_bindings_are_not_present() {
        let snippet: Snippet = serde_json::from_value(json!({
            "id": "7",
            "name": "n",
            "content": "c",
            "category": "text",
            "url": "   ",
            "exePath": "",
            "createdAt": "2025-05-14T08:00:00Z"
        }))
        .unwrap();

        assert!(snippet.url().is_none());
        assert!(snippet.exe_path().is_none());
    }

    #[test]
    fn draft_normalization_trims_and_drops_blanks() {
        let mut draft = SnippetDraft::new("  name ", " content\n", " text ");
        draft.description = Some("   ".into());
        draft.url = Some(" example.com ".into());
        let draft = draft.normalized();

        assert_eq!(draft.name, "name");
        assert_eq!(draft.content, "content");
        assert_eq!(draft.category, "text");
        assert_eq!(draft.description, None);
        assert_eq!(draft.url.as_deref(), Some("example.com"));
    }

    #[test]
    fn priority_parses_short_forms() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("m".parse::<Priority>(), Ok(Priority::Medium));
        assert!("urgent".parse::<Priority>().is_err());
    }
}
