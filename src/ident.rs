//! Identifier and timestamp provider for new comments.
//!
//! Ids are derived from the millisecond epoch clock and rendered as decimal
//! strings, matching the shape of ids found in pre-existing stored threads.
//! An atomic high-water mark keeps them strictly increasing within the
//! process even when the clock stands still or steps backwards.

use crate::types::CommentId;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of unique comment ids and creation timestamps.
pub struct IdProvider {
    last_id: AtomicI64,
}

impl Default for IdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdProvider {
    pub fn new() -> Self {
        IdProvider {
            last_id: AtomicI64::new(0),
        }
    }

    /// Generate an id unique among ids produced by this provider.
    pub fn new_id(&self) -> CommentId {
        let now = Utc::now().timestamp_millis();
        // fetch_update returns the previous value; the closure never declines,
        // so the stored value is now.max(prev + 1).
        let prev = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(0);
        now.max(prev + 1).to_string()
    }

    /// Current instant; round-trips through RFC 3339 serialization.
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
