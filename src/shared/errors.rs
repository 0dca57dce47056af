//! Strict error handling with CommandError enum
//!
//! Every fallible store, backend and command operation returns
//! `CommandResult<T>`. All variants are serializable so the renderer can
//! print them in the same JSON stream as events.

use thiserror::Error;
use serde::Serialize;

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CommandError {
    /// History index does not point at an entry
    #[error("Index {index} out of range (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Clipboard read/write failure (OS clipboard unavailable, etc.)
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// System I/O error (settings file, config directory)
    #[error("System I/O error: {0}")]
    SystemIO(String),

    /// Invalid input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::SystemIO(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::InvalidInput(format!("JSON error: {}", err))
    }
}

// Helper type alias for command results
pub type CommandResult<T> = Result<T, CommandError>;
