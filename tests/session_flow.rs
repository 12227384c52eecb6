use snipnote::Error;
use snipnote::models::{DocumentStore, Priority, SnippetDraft, StorageManager};
use snipnote::search::CategoryFilter;
use snipnote::session::Session;
use tempfile::tempdir;

fn open_in(dir: &std::path::Path) -> Session<StorageManager> {
    Session::open(StorageManager::new(dir.join("snippets.json")))
}

fn visible_names(session: &Session<StorageManager>) -> Vec<String> {
    session
        .visible_snippets()
        .iter()
        .map(|s| s.name.clone())
        .collect()
}

fn add(session: &mut Session<StorageManager>, name: &str, category: &str) -> String {
    session
        .create_snippet(SnippetDraft::new(name, format!("{} content", name), category))
        .unwrap()
}

#[test]
fn first_run_writes_seed_document() {
    let dir = tempdir().unwrap();
    let session = open_in(dir.path());

    assert_eq!(session.collection().snippets.len(), 6);
    assert_eq!(session.collection().categories.len(), 9);

    let stored = session.store().load().unwrap().unwrap();
    assert_eq!(stored.snippets.len(), 6);
}

#[test]
fn created_snippet_survives_reopen() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());
    let id = add(&mut session, "deploy", "commands");

    let reopened = open_in(dir.path());
    let snippet = reopened.collection().snippet(&id).unwrap();
    assert_eq!(snippet.name, "deploy");
    assert_eq!(reopened.collection().snippets[0].id, id);
    assert_eq!(reopened.collection().snippets.len(), 7);
}

#[test]
fn deleting_category_moves_its_snippets_to_first_category() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());

    let mut editor = session.edit_categories();
    editor.create("", "Temp", "Temporary").unwrap();
    session.commit_categories(editor).unwrap();
    let id = add(&mut session, "scratch", "temp");

    let mut editor = session.edit_categories();
    let plan = editor.plan_delete("temp").unwrap();
    assert_eq!(plan.affected, 1);
    assert_eq!(plan.reassign_to, "skills");
    editor.delete(&plan).unwrap();
    session.commit_categories(editor).unwrap();

    let reopened = open_in(dir.path());
    assert_eq!(reopened.collection().snippet(&id).unwrap().category, "skills");
    assert!(!reopened.collection().has_category("temp"));
}

#[test]
fn discarded_category_edits_never_reach_disk() {
    let dir = tempdir().unwrap();
    let session = open_in(dir.path());

    let mut editor = session.edit_categories();
    editor.rename("models", "LLMs").unwrap();
    drop(editor);

    let reopened = open_in(dir.path());
    assert_eq!(reopened.collection().category_name("models"), "Models");
}

#[test]
fn dragging_low_snippet_onto_high_one() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());
    for snippet in session.collection().snippets.clone() {
        session.delete_snippet(&snippet.id).unwrap();
    }

    let c = add(&mut session, "C", "text");
    let b = add(&mut session, "B", "text");
    let a = add(&mut session, "A", "text");
    session.set_priority(&c, Priority::Low).unwrap();
    session.set_priority(&a, Priority::High).unwrap();
    session.set_priority(&b, Priority::High).unwrap();
    assert_eq!(visible_names(&session), ["A", "B", "C"]);

    assert!(session.move_snippet(&c, &a).unwrap());
    assert_eq!(visible_names(&session), ["A", "C", "B"]);

    let reopened = open_in(dir.path());
    let orders: Vec<(String, Priority, f64)> = reopened
        .visible_snippets()
        .iter()
        .map(|s| (s.name.clone(), s.priority(), s.order()))
        .collect();
    assert_eq!(
        orders,
        [
            ("A".to_string(), Priority::High, 0.0),
            ("C".to_string(), Priority::High, 1.0),
            ("B".to_string(), Priority::High, 2.0),
        ]
    );
}

#[test]
fn filter_and_query_compose_with_priority_order() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());
    session.set_priority("3", Priority::High).unwrap();

    session.filter = CategoryFilter::parse("models");
    session.query = "CLAUDE".to_string();
    let names = visible_names(&session);
    assert_eq!(names[0], "claude-haiku");
    assert_eq!(names.len(), 3);

    session.query = "docs".to_string();
    assert!(visible_names(&session).is_empty());
}

#[test]
fn invalid_create_leaves_document_untouched() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());
    let before = std::fs::read_to_string(dir.path().join("snippets.json")).unwrap();

    let blank = session.create_snippet(SnippetDraft::new("  ", "content", "text"));
    assert!(matches!(blank, Err(Error::Validation(_))));
    let unknown = session.create_snippet(SnippetDraft::new("name", "content", "nope"));
    assert!(matches!(unknown, Err(Error::Validation(_))));

    let after = std::fs::read_to_string(dir.path().join("snippets.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn edit_flow_updates_in_place() {
    let dir = tempdir().unwrap();
    let mut session = open_in(dir.path());

    let mut draft = session.begin_edit("5").unwrap();
    assert_eq!(session.editing_id(), Some("5"));
    draft.url = Some("docs.anthropic.com".to_string());
    let id = session.submit(draft).unwrap();

    assert_eq!(id, "5");
    assert_eq!(session.editing_id(), None);
    let reopened = open_in(dir.path());
    let snippet = reopened.collection().snippet("5").unwrap();
    assert_eq!(snippet.url(), Some("docs.anthropic.com"));
    assert!(snippet.updated_at.is_some());
    assert_eq!(reopened.collection().snippets.len(), 6);
}
