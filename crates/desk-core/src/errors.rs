//! Cross-cutting error types for deskboard.
//!
//! Domain-specific errors (`DirectoryError`, `DatabaseError`, `AuthError`)
//! live in their own crates and converge in `desk-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any deskboard crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A ticket lookup returned no result.
    #[error("Ticket not found: {id}")]
    NotFound { id: i64 },

    /// Data failed validation (identifiers, offsets, formats).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
