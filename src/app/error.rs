use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("No entry for {date}")]
    NotFound { date: String },

    #[error("Item index {index} out of range for {date} ({count} items)")]
    IndexOutOfRange {
        date: String,
        index: usize,
        count: usize,
    },

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Comment provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network is offline")]
    Offline,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JournalError {
    /// Failures originating from the comment provider or the transport to it.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, JournalError::Provider(_) | JournalError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
