//! CLI Module for snipnote
//! Each invocation performs one action against the session and then renders
//! the resulting state. Domain errors are printed, never propagated: the
//! process always exits normally after reporting them.

pub mod commands;
pub mod render;

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;

use colored::Colorize;

use crate::error::{Error, Result};
use crate::models::DocumentStore;
use crate::session::{LaunchAction, Session};
use crate::shell::Shell;
use render::bar;

/// Flags that take a value
const VALUE_FLAGS: [&str; 8] = [
    "name", "content", "category", "desc", "url", "file", "folder", "exe",
];

/// Command line arguments after the command word
#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub positional: Vec<String>,
    pub flags: HashMap<String, String>,
    pub switches: HashSet<String>,
}

impl ParsedArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-y" | "--yes" => {
                    parsed.switches.insert("yes".to_string());
                }
                flag if flag.starts_with("--") && flag.len() > 2 => {
                    let name = &flag[2..];
                    if !VALUE_FLAGS.contains(&name) {
                        return Err(Error::validation(format!("Unknown option: {}", flag)));
                    }
                    let value = iter
                        .next()
                        .ok_or_else(|| Error::validation(format!("Missing value for {}", flag)))?;
                    parsed.flags.insert(name.to_string(), value.clone());
                }
                _ => parsed.positional.push(arg.clone()),
            }
        }

        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn yes(&self) -> bool {
        self.switches.contains("yes")
    }

    /// Positional arguments from `from` onwards joined with spaces
    pub fn rest(&self, from: usize) -> String {
        self.positional
            .get(from..)
            .map(|rest| rest.join(" "))
            .unwrap_or_default()
    }

    fn require(&self, index: usize, usage: &str) -> Result<&str> {
        self.positional(index)
            .ok_or_else(|| Error::validation(format!("Usage: snipnote {}", usage)))
    }
}

/// Executes CLI commands based on the provided arguments
pub fn execute_cli<S: DocumentStore>(
    args: &[String],
    session: &mut Session<S>,
    shell: &impl Shell,
) -> std::result::Result<(), Box<dyn StdError>> {
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let outcome = ParsedArgs::parse(&args[1..])
        .and_then(|parsed| dispatch(&args[0], &parsed, session, shell));

    if let Err(e) = outcome {
        report_error(&e);
    }

    Ok(())
}

fn dispatch<S: DocumentStore>(
    command: &str,
    args: &ParsedArgs,
    session: &mut Session<S>,
    shell: &impl Shell,
) -> Result<()> {
    match command {
        "list" | "ls" => commands::list(session, args),
        "search" | "find" => {
            args.require(0, "search <QUERY>")?;
            commands::search(session, &args.rest(0))
        }
        "show" | "view" | "cat" => commands::show(session, args.require(0, "show <NAME_OR_ID>")?),
        "add" | "new" => commands::add(session, args),
        "edit" => commands::edit(session, args),
        "rm" | "delete" => commands::delete(session, args),
        "copy" | "cp" => commands::copy(session, args.require(0, "copy <NAME_OR_ID>")?, shell),
        "open" => {
            let target = args.require(0, "open <NAME_OR_ID> url|file|folder")?;
            let action = args
                .require(1, "open <NAME_OR_ID> url|file|folder")?
                .parse::<LaunchAction>()
                .map_err(Error::Validation)?;
            commands::launch(session, target, action, shell)
        }
        "run" => commands::launch(
            session,
            args.require(0, "run <NAME_OR_ID>")?,
            LaunchAction::Executable,
            shell,
        ),
        "priority" | "prio" => commands::priority(session, args),
        "move" | "mv" => commands::move_snippet(session, args),
        "categories" | "cats" => {
            render::print_categories(session.collection());
            Ok(())
        }
        "category" => commands::category(session, args),
        "import" => commands::import(session, args.require(0, "import <PATH>")?),
        "export" => commands::export(session, args.require(0, "export <PATH>")?),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            println!("{}  Unknown command: {}", bar(), command);
            print_help();
            Ok(())
        }
    }
}

fn report_error(error: &Error) {
    let label = match error {
        Error::Validation(_) => "Error",
        Error::NotFound(_) => "Not found",
        Error::Persistence(_) => "Storage",
        Error::ImportFormat(_) => "Import",
        Error::Launch(_) => "Launch",
    };
    println!("{}  {}: {}", bar(), label.bright_red().bold(), error);
}

/// Prints the help message with available commands
pub fn print_help() {
    println!("{}  {}", bar(), "SNIPNOTE - SNIPPET NOTEBOOK".bold());

    println!("{}  {}", bar(), "USAGE:".bright_yellow());
    println!("{}  snipnote [COMMAND] [ARGS]", bar());
    println!("{}  {}", bar(), "COMMANDS:".bright_yellow());

    let commands = [
        ("list, ls [CATEGORY] [QUERY]", "List snippets, optionally filtered"),
        ("search, find <QUERY>", "Search names, content and descriptions"),
        ("show, view <NAME_OR_ID>", "Display a snippet (partial name works)"),
        ("add <NAME> <CONTENT>", "Create a snippet (--category --desc --url ...)"),
        ("edit <NAME_OR_ID>", "Change fields (--name --content --category ...)"),
        ("rm <NAME_OR_ID> [--yes]", "Delete a snippet"),
        ("copy, cp <NAME_OR_ID>", "Copy snippet content to the clipboard"),
        ("open <NAME_OR_ID> <ACTION>", "Open the bound url, file or folder"),
        ("run <NAME_OR_ID>", "Launch the bound program"),
        ("priority <NAME_OR_ID> <P>", "Set priority: high, medium or low"),
        ("move <DRAGGED> <TARGET>", "Move a snippet onto another one"),
        ("categories, cats", "List categories"),
        ("category add <ID> <NAME> [ICON]", "Create a category"),
        ("category rename <ID> <NAME>", "Rename a category"),
        ("category icon <ID> <ICON>", "Change a category icon"),
        ("category rm <ID> [--yes]", "Delete a category"),
        ("import <PATH>", "Replace all data with a JSON or YAML file"),
        ("export <PATH>", "Write all data to a JSON or YAML file"),
        ("help", "Display this help message"),
    ];

    for (usage, description) in commands {
        println!("{}  {:<34} {}", bar(), usage.bright_white(), description);
    }
}
