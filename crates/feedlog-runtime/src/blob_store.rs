//! Blob storage for raw feeding logs.
//!
//! The pipeline only ever sees text; where that text comes from is behind
//! [`BlobStore`]. The filesystem implementation keeps each log as a file
//! under a root directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use feedlog_core::{FeedlogError, Result};
use tracing::{debug, warn};

// ── BlobStore ─────────────────────────────────────────────────────────────────

/// Size and modification metadata for a stored blob.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobMetadata {
    /// Blob size in bytes.
    pub size_bytes: u64,
    /// Last modification time, when the backing store tracks one.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Named blob storage: fetch raw log text by name, report its metadata,
/// store uploads, and enumerate what is available.
pub trait BlobStore {
    /// Fetch the blob's full content as UTF-8 text.
    fn fetch(&self, name: &str) -> Result<String>;

    /// Size and last-modified metadata for the named blob.
    fn metadata(&self, name: &str) -> Result<BlobMetadata>;

    /// Store (or overwrite) a blob under `name`.
    fn put(&self, name: &str, content: &str) -> Result<()>;

    /// All blob names in the store, sorted.
    fn list(&self) -> Result<Vec<String>>;
}

// ── FsBlobStore ───────────────────────────────────────────────────────────────

/// Filesystem-backed blob store rooted at a directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BlobStore for FsBlobStore {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(FeedlogError::BlobNotFound(name.to_string()));
        }
        debug!(name, "fetching blob");
        std::fs::read_to_string(&path).map_err(|source| FeedlogError::BlobRead {
            name: name.to_string(),
            source,
        })
    }

    fn metadata(&self, name: &str) -> Result<BlobMetadata> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(FeedlogError::BlobNotFound(name.to_string()));
        }
        let meta = std::fs::metadata(&path).map_err(|source| FeedlogError::BlobRead {
            name: name.to_string(),
            source,
        })?;
        Ok(BlobMetadata {
            size_bytes: meta.len(),
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    fn put(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        debug!(name, bytes = content.len(), "stored blob");

        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            warn!("Blob root does not exist: {}", self.root.display());
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = walkdir::WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|rel| rel.to_string_lossy().to_string())
            })
            .filter(|name| !name.ends_with(".tmp"))
            .collect();

        names.sort();
        Ok(names)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
