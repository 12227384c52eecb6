/// Failures surfaced to the user by the snippet collection manager.
/// None of these are fatal: every variant leaves the session usable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing required field, duplicate id, protected category and the like.
    /// Raised before any mutation happens.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Reading or writing the document failed. For saves, the in-memory
    /// collection already holds the mutation.
    #[error("storage error: {0:#}")]
    Persistence(#[from] anyhow::Error),

    #[error("invalid import file: {0}")]
    ImportFormat(String),

    #[error("launch failed: {0}")]
    Launch(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }
}
