//! Comment node types and the persisted store shape.
//!
//! Serialized field names (`date`, `replies`, `isAuthor`) are fixed for
//! compatibility with pre-existing stored threads.

use crate::types::{CommentId, PageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single comment and all replies nested under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    /// Creation timestamp, fixed at creation and immutable thereafter.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    /// Whether the resolved author matched the configured site-author name at
    /// creation time. Never recomputed.
    #[serde(rename = "isAuthor", default)]
    pub is_author: bool,
    /// Direct replies, insertion-ordered.
    #[serde(rename = "replies", default)]
    pub children: Vec<CommentNode>,
}

/// Top-level comments of one page, insertion-ordered.
pub type CommentForest = Vec<CommentNode>;

/// All persisted threads, keyed by page identifier. The unit of persistence.
pub type CommentStore = BTreeMap<PageId, CommentForest>;
