pub mod category;
pub mod collection;
pub mod export;
pub mod snippet;
pub mod storage;

pub use category::{Category, DEFAULT_ICON, default_categories};
pub use collection::{Collection, StoredCategories, StoredDocument};
pub use export::{ExportFormat, export_collection, import_collection};
pub use snippet::{Priority, Snippet, SnippetDraft};
pub use storage::{DocumentStore, StorageManager};
