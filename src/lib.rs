//! Replytree: Locally Persisted Comment Threads
//!
//! A per-page comment thread system that stores an arbitrarily nested tree of
//! comments in a local key-value store and re-renders it from the persisted
//! structure.

pub mod config;
pub mod error;
pub mod ident;
pub mod logging;
pub mod render;
pub mod session;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
