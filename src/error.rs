use thiserror::Error;

/// Application-specific error type
#[derive(Debug, Error)]
pub enum SoloLevelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Could not determine data directory")]
    NoDataDirectory,

    /// A category lookup that must match exactly one row did not.
    #[error("Expected exactly one category named {name:?}, found {found}")]
    CategoryLookup { name: String, found: usize },
}

/// Convenience type alias for Result with SoloLevelError
pub type Result<T> = std::result::Result<T, SoloLevelError>;
