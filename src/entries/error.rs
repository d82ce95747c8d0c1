//! Entry error types

use thiserror::Error;

/// Errors raised while interpreting raw entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// A string did not name any variant of an attribute enum
    #[error("Unknown {kind} value: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// An entry export could not be decoded
    #[error("Malformed entry data: {0}")]
    Malformed(String),
}

/// Result type alias for entry operations
pub type EntryResult<T> = Result<T, EntryError>;
