//! OS collaborators: clipboard and launching of bound URLs, files, folders
//! and executables.

use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// Extensions launched by spawning the program directly. Anything else,
/// scripts such as `.ps1` included, goes to the OS opener.
const EXECUTABLE_EXTENSIONS: [&str; 3] = ["exe", "bat", "cmd"];

/// Everything the collection manager asks of the desktop environment.
/// Results are only inspected for success or failure.
pub trait Shell {
    fn copy_text(&self, text: &str) -> Result<()>;

    fn launch_executable(&self, path: &str) -> Result<()>;

    fn open_url(&self, url: &str) -> Result<()>;

    fn open_file(&self, path: &str) -> Result<()>;

    fn open_folder(&self, path: &str) -> Result<()>;
}

/// Prepends `https://` unless the url already carries an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if URL_SCHEME.is_match(url) {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::not_found(format!("{} not found: {}", what, path.display())))
    }
}

fn is_executable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXECUTABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn open_path(path: &Path) -> Result<()> {
    open::that(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "opener failed");
        Error::Launch(e.to_string())
    })
}

/// Shell backed by the system clipboard and the platform opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn copy_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::Launch(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::Launch(e.to_string()))
    }

    fn launch_executable(&self, path: &str) -> Result<()> {
        let path = Path::new(path);
        ensure_exists(path, "Executable")?;

        if is_executable(path) {
            debug!(path = %path.display(), "spawning executable");
            Command::new(path).spawn().map(|_| ()).map_err(|e| {
                warn!(path = %path.display(), error = %e, "spawn failed");
                Error::Launch(e.to_string())
            })
        } else {
            open_path(path)
        }
    }

    fn open_url(&self, url: &str) -> Result<()> {
        let url = normalize_url(url);
        debug!(%url, "opening url");
        open::that(&url).map_err(|e| {
            warn!(%url, error = %e, "opener failed");
            Error::Launch(e.to_string())
        })
    }

    fn open_file(&self, path: &str) -> Result<()> {
        let path = Path::new(path);
        ensure_exists(path, "File")?;
        open_path(path)
    }

    fn open_folder(&self, path: &str) -> Result<()> {
        let path = Path::new(path);
        ensure_exists(path, "Folder")?;
        open_path(path)
    }
}
