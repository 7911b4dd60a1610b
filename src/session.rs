//! Comment Session
//!
//! Wires form input to tree mutations, persistence, and re-rendering for one
//! page. Owns the transient per-node reply-form state, which is never
//! persisted and never part of the tree itself.

use crate::error::ThreadError;
use crate::ident::IdProvider;
use crate::render::{render, DisplayTree};
use crate::store::ThreadStore;
use crate::tree::{self, CommentForest, Submission};
use crate::types::CommentId;
use std::collections::HashMap;
use tracing::warn;

/// Visibility of a reply form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVisibility {
    Hidden,
    Shown,
}

/// Editable fields of a comment form.
#[derive(Debug, Clone, Default)]
pub struct ReplyDraft {
    pub name: String,
    pub anonymous: bool,
    pub content: String,
}

impl ReplyDraft {
    /// Toggle the anonymous flag. Checking it disables the paired name field,
    /// so the name is cleared.
    pub fn set_anonymous(&mut self, anonymous: bool) {
        self.anonymous = anonymous;
        if anonymous {
            self.name.clear();
        }
    }

    /// Whether the name field accepts input.
    pub fn name_enabled(&self) -> bool {
        !self.anonymous
    }

    fn to_submission(&self) -> Submission {
        Submission {
            name: self.name.clone(),
            content: self.content.clone(),
            anonymous: self.anonymous,
        }
    }
}

/// Transient reply form attached to one comment.
#[derive(Debug, Clone)]
pub struct ReplyForm {
    pub visibility: FormVisibility,
    pub draft: ReplyDraft,
}

/// Result of a successful post.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub id: CommentId,
    /// False when the durable write failed; the comment is still in the
    /// in-memory forest for this session.
    pub persisted: bool,
}

/// One page's comment thread plus its interaction state.
pub struct CommentSession<S: ThreadStore> {
    store: S,
    page_id: String,
    site_author: String,
    ids: IdProvider,
    forest: CommentForest,
    top_form: ReplyDraft,
    reply_forms: HashMap<CommentId, ReplyForm>,
}

impl<S: ThreadStore> CommentSession<S> {
    /// Load the forest for `page_id` and start a session. A corrupt or
    /// missing store yields an empty thread.
    pub fn open(store: S, page_id: &str, site_author: &str) -> Result<Self, ThreadError> {
        let forest = store.load_forest(page_id)?;
        Ok(CommentSession {
            store,
            page_id: page_id.to_string(),
            site_author: site_author.to_string(),
            ids: IdProvider::new(),
            forest,
            top_form: ReplyDraft::default(),
            reply_forms: HashMap::new(),
        })
    }

    pub fn comments(&self) -> &CommentForest {
        &self.forest
    }

    /// Project the current forest. Callers re-render after every mutation.
    pub fn render(&self) -> DisplayTree {
        render(&self.forest)
    }

    /// The always-present top-level comment form.
    pub fn top_form_mut(&mut self) -> &mut ReplyDraft {
        &mut self.top_form
    }

    /// Post a top-level comment from the top form, persist, and reset the
    /// form. Validation failure leaves both the forest and the form intact.
    pub fn submit_top_level(&mut self) -> Result<PostOutcome, ThreadError> {
        let submission = self.top_form.to_submission();
        let id = tree::post_top_level(&mut self.forest, &submission, &self.site_author, &self.ids)?;
        let persisted = self.persist();
        self.top_form = ReplyDraft::default();
        Ok(PostOutcome { id, persisted })
    }

    /// Activate the reply affordance on a comment: materialize a fresh form
    /// the first time, afterwards toggle visibility without discarding the
    /// draft.
    pub fn toggle_reply_form(&mut self, comment_id: &str) -> &ReplyForm {
        let form = self
            .reply_forms
            .entry(comment_id.to_string())
            .or_insert_with(|| ReplyForm {
                visibility: FormVisibility::Hidden,
                draft: ReplyDraft::default(),
            });
        form.visibility = match form.visibility {
            FormVisibility::Hidden => FormVisibility::Shown,
            FormVisibility::Shown => FormVisibility::Hidden,
        };
        form
    }

    /// The reply form bound to a comment, if it has been activated.
    pub fn reply_form(&self, comment_id: &str) -> Option<&ReplyForm> {
        self.reply_forms.get(comment_id)
    }

    /// Mutable draft of a shown reply form, for field edits.
    pub fn reply_draft_mut(&mut self, comment_id: &str) -> Option<&mut ReplyDraft> {
        self.reply_forms
            .get_mut(comment_id)
            .map(|form| &mut form.draft)
    }

    /// Submit the reply form bound to `parent_id`: insert the reply, persist,
    /// and discard the form. On validation failure the form is retained so
    /// the user can correct it.
    pub fn submit_reply(&mut self, parent_id: &str) -> Result<PostOutcome, ThreadError> {
        let submission = match self.reply_forms.get(parent_id) {
            Some(form) if form.visibility == FormVisibility::Shown => form.draft.to_submission(),
            _ => return Err(ThreadError::ParentNotFound(parent_id.to_string())),
        };
        let id = tree::insert_reply(
            &mut self.forest,
            parent_id,
            &submission,
            &self.site_author,
            &self.ids,
        )?;
        self.reply_forms.remove(parent_id);
        let persisted = self.persist();
        Ok(PostOutcome { id, persisted })
    }

    /// Hide and discard a reply form without touching the tree. The next
    /// activation recreates it fresh.
    pub fn cancel_reply(&mut self, comment_id: &str) {
        self.reply_forms.remove(comment_id);
    }

    fn persist(&self) -> bool {
        match self.store.save_forest(&self.page_id, &self.forest) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    page_id = self.page_id.as_str(),
                    "Comment saved in memory only, store write failed: {}", e
                );
                false
            }
        }
    }
}
