//! Error types for comment thread operations.

use crate::types::CommentId;
use thiserror::Error;

/// Errors surfaced by the comment thread core.
///
/// Corrupt persisted payloads are deliberately not represented here: the
/// persistence gateway degrades them to an empty store and logs a warning
/// instead of failing the caller.
#[derive(Debug, Error)]
pub enum ThreadError {
    /// Comment body was blank after trimming; no mutation was performed.
    #[error("Comment content is empty")]
    EmptyContent,

    /// The reply target no longer exists in the forest; no mutation was
    /// performed.
    #[error("Parent comment not found: {0}")]
    ParentNotFound(CommentId),

    /// The durable store rejected a write. The in-memory forest already
    /// reflects the mutation and remains usable for the session.
    #[error("Failed to write comment store: {0}")]
    StoreWrite(String),

    /// The durable store could not be opened.
    #[error("Failed to open comment store: {0}")]
    StoreOpen(String),

    /// Configuration file or value problem.
    #[error("Configuration error: {0}")]
    Config(String),
}
