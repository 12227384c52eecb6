use colored::{ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::{Collection, DocumentStore, Snippet};
use crate::search::CategoryFilter;
use crate::session::Session;

const NAME_COLUMN: usize = 24;
const PREVIEW_COLUMN: usize = 48;

/// Left margin used on every output line
pub fn bar() -> ColoredString {
    "┃".bright_magenta()
}

pub fn rule(width: usize) -> ColoredString {
    "─".repeat(width).bright_magenta()
}

/// Pads `text` with spaces to `width` terminal columns
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// Cuts `text` to at most `width` columns on one line, adding an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    let multiline = text.lines().nth(1).is_some();
    if UnicodeWidthStr::width(line) <= width && !multiline {
        return line.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn category_badge(collection: &Collection, id: &str) -> String {
    match collection.category(id) {
        Some(category) => category.label(),
        None => id.to_string(),
    }
}

fn filter_label(collection: &Collection, filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "📋 All".to_string(),
        CategoryFilter::Category(id) => category_badge(collection, id),
    }
}

/// Prints the snippets visible under the session's filter and query
pub fn print_snippet_list<S: DocumentStore>(session: &Session<S>) {
    let collection = session.collection();
    let visible = session.visible_snippets();

    let mut heading = filter_label(collection, &session.filter);
    if !session.query.is_empty() {
        heading = format!("{} matching '{}'", heading, session.query);
    }
    println!("{}  {} {}", bar(), "SNIPPETS".bold(), heading.bright_white());
    println!("{}", rule(60));

    if visible.is_empty() {
        println!("{}  No snippets found", bar());
        println!(
            "{}  Use {} to create one",
            bar(),
            "snipnote add <NAME> <CONTENT>".bright_white()
        );
        return;
    }

    for (idx, snippet) in visible.iter().enumerate() {
        println!(
            "{}  {} {} {} {} {}",
            bar(),
            format!("{:>2}.", idx + 1).bright_yellow(),
            snippet.priority().marker(),
            pad(&truncate(&snippet.name, NAME_COLUMN), NAME_COLUMN).bright_white().bold(),
            truncate(&snippet.content, PREVIEW_COLUMN),
            format!("[{}]", category_badge(collection, &snippet.category)).bright_black()
        );
    }

    println!("{}", rule(60));
    println!(
        "{}  {} of {} snippets",
        bar(),
        visible.len(),
        collection.snippets.len()
    );
}

fn field(label: ColoredString, value: &str) {
    println!("{}  {}: {}", bar(), label, value);
}

/// Prints every field of a snippet followed by its content
pub fn print_snippet_detail(collection: &Collection, snippet: &Snippet) {
    println!(
        "{}  {} {}",
        bar(),
        "SNIPPET".bright_green().bold(),
        snippet.name.bold()
    );
    println!("{}", rule(60));

    field(
        "Category".bright_blue(),
        &category_badge(collection, &snippet.category),
    );
    field(
        "Priority".bright_yellow(),
        &format!("{} {}", snippet.priority().marker(), snippet.priority()),
    );
    if let Some(desc) = snippet.description() {
        field("Description".bright_cyan(), desc);
    }
    if let Some(url) = snippet.url() {
        field("URL".bright_cyan(), url);
    }
    if let Some(path) = snippet.file_path() {
        field("File".bright_cyan(), path);
    }
    if let Some(path) = snippet.folder_path() {
        field("Folder".bright_cyan(), path);
    }
    if let Some(path) = snippet.exe_path() {
        field("Program".bright_cyan(), path);
    }
    field(
        "Created".bright_black(),
        &snippet.created_at.format("%Y-%m-%d %H:%M").to_string(),
    );
    if let Some(updated) = snippet.updated_at {
        field(
            "Updated".bright_black(),
            &updated.format("%Y-%m-%d %H:%M").to_string(),
        );
    }
    field("ID".bright_black(), &snippet.id);
    println!("{}", rule(60));

    for line in snippet.content.lines() {
        println!("{}  {}", bar(), line);
    }
}

/// Lists categories with their snippet counts
pub fn print_categories(collection: &Collection) {
    println!("{}  {}", bar(), "CATEGORIES".bold());
    println!("{}", rule(60));

    for (idx, category) in collection.categories.iter().enumerate() {
        let badge = if category.is_protected() {
            " default".bright_black()
        } else {
            "".normal()
        };

        println!(
            "{}  {} {} {} {}{}",
            bar(),
            format!("{:>2}.", idx + 1).bright_yellow(),
            pad(&category.label(), NAME_COLUMN).bright_white().bold(),
            format!("{:<14}", category.id).bright_black().italic(),
            format!("{} snippets", collection.count_in_category(&category.id)),
            badge
        );
    }
}
