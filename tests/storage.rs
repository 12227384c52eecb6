use std::fs;

use snipnote::Error;
use snipnote::models::{StorageManager, default_categories};
use snipnote::session::Session;
use tempfile::tempdir;

#[test]
fn legacy_category_list_is_upgraded_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    fs::write(
        &path,
        r#"{
            "snippets": [
                {"id": "a", "name": "old", "content": "kept", "category": "prompts",
                 "createdAt": "2025-01-01T00:00:00Z"}
            ],
            "categories": ["skills", "prompts"]
        }"#,
    )
    .unwrap();

    let session = Session::open(StorageManager::new(&path));
    assert_eq!(session.collection().categories, default_categories());
    assert_eq!(session.collection().snippets[0].content, "kept");

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["categories"][0]["id"], "skills");
    assert_eq!(raw["categories"][0]["icon"], "⚡");
    assert_eq!(raw["snippets"][0]["id"], "a");
}

#[test]
fn unreadable_document_is_not_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    fs::write(&path, "{ not json").unwrap();

    let session = Session::open(StorageManager::new(&path));
    assert_eq!(session.collection().snippets.len(), 6);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn document_uses_camel_case_and_integer_orders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("snippets.json");
    let mut session = Session::open(StorageManager::new(&path));
    session
        .set_priority("1", snipnote::models::Priority::Low)
        .unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let first = raw["snippets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "1")
        .unwrap();
    assert_eq!(first["priority"], "low");
    assert!(first["order"].is_i64());
    assert!(first.get("createdAt").is_some());
    assert!(first.get("url").is_none());
}

#[test]
fn yaml_export_imports_back() {
    let dir = tempdir().unwrap();
    let session = Session::open(StorageManager::new(dir.path().join("snippets.json")));
    let export = dir.path().join("backup.yaml");
    session.export(&export).unwrap();

    let mut other = Session::open(StorageManager::new(dir.path().join("other.json")));
    other.delete_snippet("1").unwrap();
    let count = other.import(&export).unwrap();

    assert_eq!(count, 6);
    assert_eq!(other.collection(), session.collection());
}

#[test]
fn import_without_snippets_changes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    let mut session = Session::open(StorageManager::new(&path));
    let before = fs::read_to_string(&path).unwrap();

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"categories": []}"#).unwrap();
    assert!(matches!(session.import(&bad), Err(Error::ImportFormat(_))));

    let wrong_type = dir.path().join("wrong.json");
    fs::write(&wrong_type, r#"{"snippets": {"id": "1"}}"#).unwrap();
    assert!(matches!(session.import(&wrong_type), Err(Error::ImportFormat(_))));

    assert_eq!(session.collection().snippets.len(), 6);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn import_without_categories_uses_defaults() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(StorageManager::new(dir.path().join("snippets.json")));

    let file = dir.path().join("in.json");
    fs::write(
        &file,
        r#"{"snippets": [{"id": "x", "name": "n", "content": "c", "category": "api",
            "createdAt": "2025-02-02T10:00:00Z"}]}"#,
    )
    .unwrap();

    assert_eq!(session.import(&file).unwrap(), 1);
    assert_eq!(session.collection().categories, default_categories());
    assert_eq!(session.collection().snippets[0].id, "x");
}

#[test]
fn malformed_category_entry_does_not_replace_user_categories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snippets.json");
    let original = r#"{
        "snippets": [],
        "categories": [
            {"id": "work", "name": "Work", "icon": "W"},
            {"id": "temp", "name": "Temp"}
        ]
    }"#;
    fs::write(&path, original).unwrap();

    let session = Session::open(StorageManager::new(&path));
    assert!(!session.collection().has_category("work"));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
