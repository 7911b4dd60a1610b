//! Rendering Projector
//!
//! Pure, order-preserving projection of a comment forest into a display
//! representation. Author and content are HTML-escaped unconditionally so
//! user-entered text is never interpreted as markup.

use crate::tree::{CommentForest, CommentNode};
use crate::types::CommentId;
use chrono::{DateTime, Utc};

/// Placeholder shown when a page has no comments yet.
pub const NO_COMMENTS_PLACEHOLDER: &str = "No comments yet. Be the first to comment!";

/// Display projection of one comment and its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFragment {
    pub comment_id: CommentId,
    /// Escaped author label.
    pub author: String,
    /// Human-readable formatted creation date.
    pub date: String,
    /// Escaped body text.
    pub content: String,
    /// Marks comments posted by the configured site author.
    pub is_author: bool,
    /// Marks nested replies for indentation.
    pub is_reply: bool,
    /// Id of the immediate parent, `None` for top-level comments.
    pub parent_id: Option<CommentId>,
    pub children: Vec<DisplayFragment>,
}

/// Display projection of a whole forest.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTree {
    pub fragments: Vec<DisplayFragment>,
}

/// Project a forest into its display tree.
pub fn render(forest: &CommentForest) -> DisplayTree {
    DisplayTree {
        fragments: forest
            .iter()
            .map(|node| render_node(node, false, None))
            .collect(),
    }
}

/// Project a single node, recursively, marking replies and tagging each child
/// with its immediate parent id.
pub fn render_node(node: &CommentNode, is_reply: bool, parent_id: Option<&str>) -> DisplayFragment {
    DisplayFragment {
        comment_id: node.id.clone(),
        author: escape_html(&node.author),
        date: format_date(&node.created_at),
        content: escape_html(&node.content),
        is_author: node.is_author,
        is_reply,
        parent_id: parent_id.map(str::to_string),
        children: node
            .children
            .iter()
            .map(|child| render_node(child, true, Some(node.id.as_str())))
            .collect(),
    }
}

impl DisplayTree {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Emit the thread as HTML, mirroring the markup the display layer
    /// attaches interaction handlers to.
    pub fn to_html(&self) -> String {
        if self.fragments.is_empty() {
            return format!(
                "<p class=\"no-comments\">{}</p>",
                NO_COMMENTS_PLACEHOLDER
            );
        }
        self.fragments
            .iter()
            .map(DisplayFragment::to_html)
            .collect()
    }
}

impl DisplayFragment {
    pub fn to_html(&self) -> String {
        let comment_class = if self.is_author {
            "comment author-reply"
        } else {
            "comment"
        };
        let indent_class = if self.is_reply { " reply" } else { "" };

        let replies = if self.children.is_empty() {
            String::new()
        } else {
            let inner: String = self.children.iter().map(DisplayFragment::to_html).collect();
            format!("<div class=\"replies\">{}</div>", inner)
        };

        format!(
            concat!(
                "<div class=\"{class}{indent}\" data-comment-id=\"{id}\">",
                "<div class=\"comment-header\">",
                "<span class=\"comment-author\">{author}</span>",
                "<span class=\"comment-date\">{date}</span>",
                "</div>",
                "<div class=\"comment-content\">{content}</div>",
                "<div class=\"comment-actions\">",
                "<button class=\"reply-btn\" data-reply-to=\"{id}\">Reply</button>",
                "</div>",
                "<div id=\"reply-form-{id}\" style=\"display: none;\"></div>",
                "{replies}",
                "</div>"
            ),
            class = comment_class,
            indent = indent_class,
            id = self.comment_id,
            author = self.author,
            date = self.date,
            content = self.content,
            replies = replies,
        )
    }
}

fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Escape markup-significant characters so text renders literally.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
