//! Comment Tree Model
//!
//! In-memory forest of comment nodes with recursive lookup and insertion.
//! A single search primitive underlies both top-level posts and nested
//! replies; the tree has no depth limit and no structural distinction
//! between levels.

pub mod node;

pub use node::{CommentForest, CommentNode, CommentStore};

use crate::error::ThreadError;
use crate::ident::IdProvider;
use crate::types::CommentId;

/// Display name used when the poster declines to give one.
pub const ANONYMOUS: &str = "Anonymous";

/// The three raw fields collected from a comment form.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub name: String,
    pub content: String,
    pub anonymous: bool,
}

/// Depth-first search across the forest and all descendant levels.
///
/// Iterates top-level nodes in forest order; for each, checks the node
/// itself, then its children recursively, before moving to the next sibling.
pub fn find_by_id<'a>(forest: &'a [CommentNode], id: &str) -> Option<&'a CommentNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Mutable variant of [`find_by_id`] with the same search order.
pub fn find_by_id_mut<'a>(forest: &'a mut [CommentNode], id: &str) -> Option<&'a mut CommentNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Append a new top-level comment to the forest.
///
/// Returns the id of the created node. Fails with `EmptyContent` (and
/// performs no mutation) when the trimmed body is blank.
pub fn post_top_level(
    forest: &mut CommentForest,
    submission: &Submission,
    site_author: &str,
    ids: &IdProvider,
) -> Result<CommentId, ThreadError> {
    let node = build_node(submission, site_author, ids)?;
    let id = node.id.clone();
    forest.push(node);
    Ok(id)
}

/// Append a reply under the node identified by `parent_id`, at any depth.
///
/// Fails with `EmptyContent` or `ParentNotFound`; in both cases the forest is
/// left untouched.
pub fn insert_reply(
    forest: &mut CommentForest,
    parent_id: &str,
    submission: &Submission,
    site_author: &str,
    ids: &IdProvider,
) -> Result<CommentId, ThreadError> {
    // Validate before locating the parent so neither failure mutates.
    let node = build_node(submission, site_author, ids)?;
    let parent = find_by_id_mut(forest, parent_id)
        .ok_or_else(|| ThreadError::ParentNotFound(parent_id.to_string()))?;
    let id = node.id.clone();
    parent.children.push(node);
    Ok(id)
}

/// Resolve the display author for a submission.
///
/// The anonymous flag forces "Anonymous"; otherwise the trimmed name is used,
/// falling back to "Anonymous" when blank.
pub fn resolve_author(name: &str, anonymous: bool) -> String {
    if anonymous {
        return ANONYMOUS.to_string();
    }
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

fn build_node(
    submission: &Submission,
    site_author: &str,
    ids: &IdProvider,
) -> Result<CommentNode, ThreadError> {
    let content = submission.content.trim();
    if content.is_empty() {
        return Err(ThreadError::EmptyContent);
    }
    let author = resolve_author(&submission.name, submission.anonymous);
    // Resolved authors are never empty, so an empty configured site-author
    // name can never match.
    let is_author = !site_author.is_empty() && author.to_lowercase() == site_author.to_lowercase();
    Ok(CommentNode {
        id: ids.new_id(),
        author,
        content: content.to_string(),
        created_at: ids.now(),
        is_author,
        children: Vec::new(),
    })
}
