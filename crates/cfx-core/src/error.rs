//! Error types for fiscal code construction.

use thiserror::Error;

use crate::code::Zone;

/// Errors raised when a string is turned into a [`FiscalCode`](crate::FiscalCode).
///
/// The free functions of this crate never return these; they stay total and
/// report through `Option`/`bool`/sentinel values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Input is not exactly 16 characters long.
    #[error("fiscal code must be 16 characters, got {len}")]
    InvalidLength { len: usize },

    /// A zone does not match the fiscal code grammar.
    #[error("invalid {zone} zone: '{value}'")]
    InvalidZone { zone: Zone, value: String },

    /// The control character disagrees with the first 15 characters.
    #[error("control character mismatch: expected '{expected}', found '{found}'")]
    ChecksumMismatch { expected: char, found: char },
}

/// Result type alias for fiscal code operations.
pub type Result<T> = std::result::Result<T, CodeError>;
