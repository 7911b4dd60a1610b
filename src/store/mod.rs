//! Comment Store Persistence
//!
//! Loads and saves the full multi-page comment store from a durable
//! key-value store, scoped by page identifier. One fixed key holds the whole
//! serialized [`CommentStore`]; saving a page is therefore a whole-value
//! read-modify-write. Corrupt or missing payloads degrade to an empty store
//! and never fail the caller.

pub mod persistence;

pub use persistence::{MemoryThreadStore, SledThreadStore};

use crate::error::ThreadError;
use crate::tree::{CommentForest, CommentStore};
use tracing::{debug, warn};

/// Durable backing for comment threads.
///
/// Implementors provide raw access to the single store key; the load/save
/// semantics on top of it are shared. Implemented for references too, so a
/// store can back a session without giving up ownership.
pub trait ThreadStore {
    /// Read the raw serialized store payload, `None` when the key is absent.
    fn read_raw(&self) -> Result<Option<String>, ThreadError>;

    /// Replace the raw serialized store payload.
    fn write_raw(&self, payload: &str) -> Result<(), ThreadError>;

    /// Load every persisted page thread.
    ///
    /// An absent key or an unparsable payload yields an empty store; the
    /// latter is logged, never propagated.
    fn load_store(&self) -> Result<CommentStore, ThreadError> {
        let Some(raw) = self.read_raw()? else {
            return Ok(CommentStore::new());
        };
        match serde_json::from_str(&raw) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!("Stored comments are unparsable, starting empty: {}", e);
                Ok(CommentStore::new())
            }
        }
    }

    /// Load the forest persisted for one page, empty when none exists.
    fn load_forest(&self, page_id: &str) -> Result<CommentForest, ThreadError> {
        let mut store = self.load_store()?;
        let forest = store.remove(page_id).unwrap_or_default();
        debug!(
            page_id,
            top_level = forest.len(),
            "Loaded comment forest"
        );
        Ok(forest)
    }

    /// Replace the forest persisted for one page and write the whole store
    /// back.
    ///
    /// Other pages' threads are carried over untouched; a corrupt current
    /// payload is treated as an empty store rather than aborting the save.
    fn save_forest(&self, page_id: &str, forest: &CommentForest) -> Result<(), ThreadError> {
        let mut store = self.load_store()?;
        store.insert(page_id.to_string(), forest.clone());
        let payload = serde_json::to_string(&store)
            .map_err(|e| ThreadError::StoreWrite(e.to_string()))?;
        self.write_raw(&payload)?;
        debug!(page_id, "Saved comment forest");
        Ok(())
    }
}

impl<S: ThreadStore + ?Sized> ThreadStore for &S {
    fn read_raw(&self) -> Result<Option<String>, ThreadError> {
        (**self).read_raw()
    }

    fn write_raw(&self, payload: &str) -> Result<(), ThreadError> {
        (**self).write_raw(payload)
    }
}
