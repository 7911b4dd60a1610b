//! Concrete thread store backends.

use crate::error::ThreadError;
use crate::store::ThreadStore;
use parking_lot::RwLock;
use std::path::Path;

/// Default key holding the serialized comment store. Matches the key used by
/// pre-existing stored data.
pub const DEFAULT_STORE_KEY: &str = "blog_comments";

/// Sled-backed thread store. The whole [`crate::tree::CommentStore`] lives
/// under one key in the default tree.
pub struct SledThreadStore {
    db: sled::Db,
    store_key: String,
}

impl SledThreadStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path, store_key: &str) -> Result<Self, ThreadError> {
        let db = sled::open(path).map_err(|e| ThreadError::StoreOpen(e.to_string()))?;
        Ok(SledThreadStore {
            db,
            store_key: store_key.to_string(),
        })
    }
}

impl ThreadStore for SledThreadStore {
    fn read_raw(&self) -> Result<Option<String>, ThreadError> {
        let value = self
            .db
            .get(self.store_key.as_bytes())
            .map_err(|e| ThreadError::StoreOpen(e.to_string()))?;
        match value {
            None => Ok(None),
            // Non-UTF8 payloads count as corrupt and degrade to empty
            // upstream, same as unparsable JSON.
            Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        }
    }

    fn write_raw(&self, payload: &str) -> Result<(), ThreadError> {
        self.db
            .insert(self.store_key.as_bytes(), payload.as_bytes())
            .map_err(|e| ThreadError::StoreWrite(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| ThreadError::StoreWrite(e.to_string()))?;
        Ok(())
    }
}

/// In-memory thread store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryThreadStore {
    payload: RwLock<Option<String>>,
    fail_writes: RwLock<bool>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the raw payload, e.g. with a corrupt value.
    pub fn with_payload(payload: &str) -> Self {
        MemoryThreadStore {
            payload: RwLock::new(Some(payload.to_string())),
            fail_writes: RwLock::new(false),
        }
    }

    /// Make subsequent writes fail, simulating an exhausted store.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    /// Raw payload currently held, if any.
    pub fn raw(&self) -> Option<String> {
        self.payload.read().clone()
    }
}

impl ThreadStore for MemoryThreadStore {
    fn read_raw(&self) -> Result<Option<String>, ThreadError> {
        Ok(self.payload.read().clone())
    }

    fn write_raw(&self, payload: &str) -> Result<(), ThreadError> {
        if *self.fail_writes.read() {
            return Err(ThreadError::StoreWrite("store capacity exceeded".to_string()));
        }
        *self.payload.write() = Some(payload.to_string());
        Ok(())
    }
}
