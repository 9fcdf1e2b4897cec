//! Error types for glochat

use thiserror::Error;

/// The main error type for glochat operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(String),

    /// A submission is already in flight for the chat
    #[error("Submission already pending for chat {0}")]
    SubmissionPending(String),

    /// State storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Relay transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A specialized Result type for glochat operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
