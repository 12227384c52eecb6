use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::Error;
use crate::models::collection::{Collection, StoredDocument};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// Picks the format from the file extension; anything unknown is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Writes the collection verbatim to `path`.
pub fn export_collection(collection: &Collection, path: &Path) -> Result<()> {
    let content = match ExportFormat::from_path(path) {
        ExportFormat::Json => serde_json::to_string_pretty(collection)
            .context("Failed to serialize collection to JSON")?,
        ExportFormat::Yaml => {
            serde_yaml::to_string(collection).context("Failed to serialize collection to YAML")?
        }
    };

    fs::write(path, content).context("Failed to write export file")?;
    Ok(())
}

/// Reads an export file. The only structural requirement is a `snippets`
/// sequence; missing or legacy categories are replaced with the defaults.
pub fn import_collection(path: &Path) -> crate::error::Result<Collection> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))
        .map_err(|e| Error::ImportFormat(format!("{:#}", e)))?;

    let value: serde_json::Value = match ExportFormat::from_path(path) {
        ExportFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| Error::ImportFormat(format!("not valid JSON: {}", e)))?,
        ExportFormat::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| Error::ImportFormat(format!("not valid YAML: {}", e)))?,
    };

    if !value.get("snippets").is_some_and(|s| s.is_array()) {
        return Err(Error::ImportFormat(
            "document has no \"snippets\" list".to_string(),
        ));
    }

    let document: StoredDocument = serde_json::from_value(value)
        .map_err(|e| Error::ImportFormat(format!("malformed document: {}", e)))?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = document.snippets.iter().find(|s| !seen.insert(s.id.as_str())) {
        return Err(Error::ImportFormat(format!(
            "duplicate snippet id: {}",
            duplicate.id
        )));
    }

    let (collection, _) = document.into_collection();
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::default_categories;
    use tempfile::tempdir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.yaml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("backup")), ExportFormat::Json);
    }

    #[test]
    fn yaml_export_can_be_imported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.yaml");
        let collection = Collection::seed();

        export_collection(&collection, &path).unwrap();
        let imported = import_collection(&path).unwrap();

        assert_eq!(imported.snippets.len(), collection.snippets.len());
        assert_eq!(imported.categories, collection.categories);
    }

    #[test]
    fn document_without_snippets_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "categories": [] }"#).unwrap();

        assert!(matches!(import_collection(&path), Err(Error::ImportFormat(_))));

        fs::write(&path, r#"{ "snippets": "nope" }"#).unwrap();
        assert!(matches!(import_collection(&path), Err(Error::ImportFormat(_))));
    }

    #[test]
    fn import_without_categories_gets_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.json");
        fs::write(&path, r#"{ "snippets": [] }"#).unwrap();

        let imported = import_collection(&path).unwrap();
        assert!(imported.snippets.is_empty());
        assert_eq!(imported.categories, default_categories());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dupes.json");
        let snippet = r#"{"id": "7", "name": "n", "content": "c", "category": "text",
            "createdAt": "2025-01-01T00:00:00Z"}"#;
        fs::write(&path, format!(r#"{{ "snippets": [{}, {}] }}"#, snippet, snippet)).unwrap();

        let result = import_collection(&path);
        assert!(matches!(result, Err(Error::ImportFormat(msg)) if msg.contains("7")));
    }

    #[test]
    fn malformed_category_list_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cats.json");
        fs::write(
            &path,
            r#"{ "snippets": [], "categories": [{"id": "work", "name": "Work"}] }"#,
        )
        .unwrap();

        assert!(matches!(import_collection(&path), Err(Error::ImportFormat(_))));
    }

    #[test]
    fn missing_file_is_an_import_error() {
        let dir = tempdir().unwrap();
        let result = import_collection(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::ImportFormat(_))));
    }
}
