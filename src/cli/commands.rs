use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::cli::ParsedArgs;
use crate::cli::render::{self, bar};
use crate::error::{Error, Result};
use crate::models::{DocumentStore, Priority, SnippetDraft};
use crate::search::CategoryFilter;
use crate::session::{LaunchAction, Session};
use crate::shell::Shell;

/// Asks a yes/no question on stdin; anything but y/yes counts as no
fn confirm(question: &str) -> bool {
    print!("{}  {} [y/N] ", bar(), question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn success(message: &str) {
    println!("{}  {}", bar(), message.bright_green());
}

/// Resolves a name or id to the snippet id
fn resolve_id<S: DocumentStore>(session: &Session<S>, name_or_id: &str) -> Result<String> {
    session
        .resolve(name_or_id)
        .map(|s| s.id.clone())
        .ok_or_else(|| Error::not_found(format!("No snippet found with name or id: {}", name_or_id)))
}

/// Copies the snippet flags present in `args` onto `draft`
fn apply_flags(draft: &mut SnippetDraft, args: &ParsedArgs) {
    if let Some(name) = args.flag("name") {
        draft.name = name.to_string();
    }
    if let Some(content) = args.flag("content") {
        draft.content = content.to_string();
    }
    if let Some(category) = args.flag("category") {
        draft.category = category.to_string();
    }
    let optional = [
        ("desc", &mut draft.description),
        ("url", &mut draft.url),
        ("file", &mut draft.file_path),
        ("folder", &mut draft.folder_path),
        ("exe", &mut draft.exe_path),
    ];
    for (flag, slot) in optional {
        if let Some(value) = args.flag(flag) {
            *slot = Some(value.to_string());
        }
    }
}

pub fn list<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    session.filter = CategoryFilter::parse(args.positional(0).unwrap_or("all"));
    session.query = args.rest(1);

    if let CategoryFilter::Category(id) = &session.filter {
        if !session.collection().has_category(id) && session.collection().count_in_category(id) == 0 {
            return Err(Error::not_found(format!("No category with id: {}", id)));
        }
    }

    render::print_snippet_list(session);
    Ok(())
}

pub fn search<S: DocumentStore>(session: &mut Session<S>, query: &str) -> Result<()> {
    session.filter = CategoryFilter::All;
    session.query = query.trim().to_string();
    render::print_snippet_list(session);
    Ok(())
}

pub fn show<S: DocumentStore>(session: &Session<S>, name_or_id: &str) -> Result<()> {
    match session.resolve(name_or_id) {
        Some(snippet) => {
            render::print_snippet_detail(session.collection(), snippet);
            Ok(())
        }
        None => {
            println!("{}  No snippet found with name: {}", bar(), name_or_id);
            println!("{}  Available snippets:", bar());
            println!("{}", render::rule(60));

            let snippets = session.visible_snippets();
            for (idx, snippet) in snippets.iter().enumerate().take(10) {
                println!(
                    "{}  {}. {}",
                    bar(),
                    (idx + 1).to_string().yellow(),
                    snippet.name.bright_white()
                );
            }
            if snippets.len() > 10 {
                println!("{}  ... and {} more", bar(), snippets.len() - 10);
            }
            Ok(())
        }
    }
}

pub fn add<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let name = args.require(0, "add <NAME> <CONTENT> [--category ID]")?;
    let content = args.require(1, "add <NAME> <CONTENT> [--category ID]")?;
    let default_category = session
        .collection()
        .categories
        .first()
        .map(|c| c.id.clone())
        .unwrap_or_default();

    let mut draft = SnippetDraft::new(name, content, default_category);
    apply_flags(&mut draft, args);

    session.cancel_edit();
    let id = session.submit(draft)?;
    success("Snippet added!");
    if let Some(snippet) = session.collection().snippet(&id) {
        render::print_snippet_detail(session.collection(), snippet);
    }
    Ok(())
}

pub fn edit<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let id = resolve_id(session, args.require(0, "edit <NAME_OR_ID> [--name N] ...")?)?;
    let Some(mut draft) = session.begin_edit(&id) else {
        return Err(Error::not_found(format!("Snippet not found: {}", id)));
    };

    apply_flags(&mut draft, args);
    let id = session.submit(draft)?;
    success("Snippet updated!");
    if let Some(snippet) = session.collection().snippet(&id) {
        render::print_snippet_detail(session.collection(), snippet);
    }
    Ok(())
}

pub fn delete<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let id = resolve_id(session, args.require(0, "rm <NAME_OR_ID> [--yes]")?)?;
    let name = session
        .collection()
        .snippet(&id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.clone());

    if !args.yes() && !confirm(&format!("Delete snippet '{}'?", name)) {
        println!("{}  Cancelled", bar());
        return Ok(());
    }

    if session.delete_snippet(&id)? {
        success("Snippet deleted!");
    }
    Ok(())
}

pub fn copy<S: DocumentStore>(session: &Session<S>, name_or_id: &str, shell: &impl Shell) -> Result<()> {
    let id = resolve_id(session, name_or_id)?;
    session.copy_content(&id, shell)?;
    success("Copied to clipboard!");
    Ok(())
}

pub fn launch<S: DocumentStore>(
    session: &Session<S>,
    name_or_id: &str,
    action: LaunchAction,
    shell: &impl Shell,
) -> Result<()> {
    let id = resolve_id(session, name_or_id)?;
    session.launch(&id, action, shell)?;
    match action {
        LaunchAction::Url => success("Opened in browser!"),
        LaunchAction::File => success("File opened!"),
        LaunchAction::Folder => success("Folder opened!"),
        LaunchAction::Executable => success("Program started!"),
    }
    Ok(())
}

pub fn priority<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let usage = "priority <NAME_OR_ID> high|medium|low";
    let id = resolve_id(session, args.require(0, usage)?)?;
    let priority = args
        .require(1, usage)?
        .parse::<Priority>()
        .map_err(Error::Validation)?;

    if session.set_priority(&id, priority)? {
        success("Priority updated!");
        render::print_snippet_list(session);
    }
    Ok(())
}

pub fn move_snippet<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let usage = "move <DRAGGED> <TARGET>";
    let dragged = resolve_id(session, args.require(0, usage)?)?;
    let target = resolve_id(session, args.require(1, usage)?)?;

    if session.move_snippet(&dragged, &target)? {
        success("Order updated!");
    } else {
        println!("{}  Nothing to move", bar());
    }
    render::print_snippet_list(session);
    Ok(())
}

pub fn category<S: DocumentStore>(session: &mut Session<S>, args: &ParsedArgs) -> Result<()> {
    let usage = "category add|rename|icon|rm <ID> ...";
    let action = args.require(0, usage)?;
    let id = args.require(1, usage)?;
    let mut editor = session.edit_categories();

    match action {
        "add" | "new" => {
            let name = args.require(2, "category add <ID> <NAME> [ICON]")?;
            let created = editor.create(args.positional(3).unwrap_or(""), id, name)?;
            session.commit_categories(editor)?;
            success(&format!("Category added: {}", created));
        }
        "rename" => {
            editor.rename(id, &args.rest(2))?;
            session.commit_categories(editor)?;
            success("Category saved!");
        }
        "icon" => {
            editor.set_icon(id, args.positional(2).unwrap_or(""))?;
            session.commit_categories(editor)?;
            success("Category saved!");
        }
        "rm" | "delete" => {
            let plan = editor.plan_delete(id)?;
            if plan.affected > 0 && !args.yes() {
                let question = format!(
                    "{} snippets use '{}' and will move to '{}'. Delete?",
                    plan.affected, plan.category_id, plan.reassign_to
                );
                if !confirm(&question) {
                    println!("{}  Cancelled", bar());
                    return Ok(());
                }
            }
            let moved = editor.delete(&plan)?;
            session.commit_categories(editor)?;
            success(&format!(
                "Category deleted! {} snippets moved to '{}'",
                moved, plan.reassign_to
            ));
        }
        other => {
            return Err(Error::validation(format!(
                "Unknown category action: {} (expected add, rename, icon or rm)",
                other
            )));
        }
    }

    render::print_categories(session.collection());
    Ok(())
}

pub fn import<S: DocumentStore>(session: &mut Session<S>, path: &str) -> Result<()> {
    let count = session.import(Path::new(path))?;
    success(&format!("Imported {} snippets!", count));
    Ok(())
}

pub fn export<S: DocumentStore>(session: &Session<S>, path: &str) -> Result<()> {
    session.export(Path::new(path))?;
    success(&format!("Exported to {}", path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &[&str]) -> ParsedArgs {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        ParsedArgs::parse(&raw).unwrap()
    }

    #[test]
    fn flags_override_draft_fields() {
        let mut draft = SnippetDraft::new("old", "old content", "text");
        draft.url = Some("old.example".into());

        apply_flags(
            &mut draft,
            &parsed(&["--name", "new", "--url", "new.example", "--exe", "/bin/true"]),
        );

        assert_eq!(draft.name, "new");
        assert_eq!(draft.content, "old content");
        assert_eq!(draft.url.as_deref(), Some("new.example"));
        assert_eq!(draft.exe_path.as_deref(), Some("/bin/true"));
        assert_eq!(draft.description, None);
    }
}
