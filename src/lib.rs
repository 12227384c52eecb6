//! snipnote - a personal snippet notebook
//!
//! Small reusable text fragments (model ids, URLs, commands) filed under
//! categories, searchable, ordered by priority, and optionally bound to a URL,
//! file, folder or program that can be launched from the command line.

pub mod category_editor;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ordering;
pub mod search;
pub mod session;
pub mod shell;

pub use error::{Error, Result};
