//! Core types for the comment thread system.

/// CommentId: Opaque identifier of a single comment, unique within a forest
pub type CommentId = String;

/// PageId: Opaque identifier of the page a thread belongs to
pub type PageId = String;
