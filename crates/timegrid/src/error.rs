//! Error types for timegrid operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimegridError {
    /// A clock string did not match zero-padded 24-hour `HH:MM`.
    #[error("Invalid clock time '{0}': expected HH:MM")]
    Format(String),

    /// A day index or minute value fell outside its allowed range.
    #[error("Out of range: {0}")]
    Range(String),

    /// An entry violated one of its invariants.
    #[error("Invalid entry '{id}': {message}")]
    InvalidEntry { id: String, message: String },

    /// An imported document had the wrong shape.
    #[error("Import error: {0}")]
    Import(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimegridError>;
