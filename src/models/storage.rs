use crate::models::collection::{Collection, StoredDocument};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-document persistence: the collection is always read and written as one unit.
pub trait DocumentStore {
    /// `Ok(None)` means no document has been saved yet.
    fn load(&self) -> Result<Option<StoredDocument>>;

    fn save(&self, collection: &Collection) -> Result<()>;
}

/// Storage Manager for the on-disk JSON document
#[derive(Debug, Clone)]
pub struct StorageManager {
    database_file: PathBuf,
}

impl StorageManager {
    pub fn new(database_file: impl Into<PathBuf>) -> Self {
        Self {
            database_file: database_file.into(),
        }
    }

    /// Default location: `<data dir>/snipnote/snippets.json`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("snipnote");

        Ok(data_dir.join("snippets.json"))
    }

    pub fn path(&self) -> &Path {
        &self.database_file
    }
}

impl DocumentStore for StorageManager {
    fn load(&self) -> Result<Option<StoredDocument>> {
        if !self.database_file.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.database_file).context("Failed to read database file")?;

        let document = serde_json::from_str(&content).context("Failed to parse database JSON")?;
        Ok(Some(document))
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.database_file.parent() {
            fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let content =
            serde_json::to_string_pretty(collection).context("Failed to serialize database")?;

        fs::write(&self.database_file, content).context("Failed to write database file")
    }
}
