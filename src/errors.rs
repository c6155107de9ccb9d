use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A drop category key outside the closed set of known categories
    #[error("Unknown drop category: {0}")]
    UnknownDropCategory(String),

    /// A drop references a catalog entity that does not exist
    #[error("Catalog lookup failed: {entity} {id} not found")]
    CatalogLookup { entity: &'static str, id: i64 },

    /// Category resolver and aggregator dispatch table are out of sync
    #[error("Dispatch table error: {0}")]
    DispatchTable(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InvalidData(format!("Report worker failed: {}", err))
    }
}
