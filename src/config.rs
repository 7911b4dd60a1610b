//! Thread configuration.
//!
//! Site-author name, store key, and data directory are explicit inputs to
//! the core entry points rather than ambient globals. A small TOML file can
//! supply them for the CLI.

use crate::error::ThreadError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Comment system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// Display name whose comments are highlighted as the site author's.
    /// Empty disables highlighting.
    #[serde(default)]
    pub site_author: String,

    /// Key holding the serialized comment store.
    #[serde(default = "default_store_key")]
    pub store_key: String,

    /// Database directory; None means use the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_store_key() -> String {
    crate::store::persistence::DEFAULT_STORE_KEY.to_string()
}

impl Default for ThreadConfig {
    fn default() -> Self {
        ThreadConfig {
            site_author: String::new(),
            store_key: default_store_key(),
            data_dir: None,
        }
    }
}

impl ThreadConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ThreadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ThreadError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ThreadError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Resolve the database directory, falling back to the platform data
    /// directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ThreadError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir()
    }
}

/// Platform data directory for the comment database.
pub fn default_data_dir() -> Result<PathBuf, ThreadError> {
    let project_dirs = directories::ProjectDirs::from("", "replytree", "replytree")
        .ok_or_else(|| {
            ThreadError::Config("Could not determine platform data directory".to_string())
        })?;
    Ok(project_dirs.data_dir().join("comments"))
}

/// Derive a page identifier from a raw page path.
///
/// Takes the last path segment with any `.html` suffix stripped, falling
/// back to `index` when nothing remains.
pub fn derive_page_id(raw: &str) -> String {
    let segment = raw.rsplit('/').next().unwrap_or("");
    let stem = segment.strip_suffix(".html").unwrap_or(segment);
    if stem.is_empty() {
        "index".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_page_id_from_path() {
        assert_eq!(derive_page_id("/posts/hello-world.html"), "hello-world");
        assert_eq!(derive_page_id("hello-world.html"), "hello-world");
        assert_eq!(derive_page_id("/posts/notes"), "notes");
        assert_eq!(derive_page_id("/"), "index");
        assert_eq!(derive_page_id(""), "index");
        assert_eq!(derive_page_id("/.html"), "index");
    }

    #[test]
    fn config_defaults_apply_to_missing_fields() {
        let config: ThreadConfig = toml::from_str("site_author = \"Victor\"").unwrap();
        assert_eq!(config.site_author, "Victor");
        assert_eq!(config.store_key, "blog_comments");
        assert!(config.data_dir.is_none());
    }
}
