//! Structural validation for uploaded feeding logs.
//!
//! An upload is checked before it ever reaches the store: the first line,
//! lower-cased, must contain all four required field names. This is a
//! cheaper, looser check than full header resolution — it rejects obviously
//! wrong files at the door while leaving exact column matching to the
//! pipeline.

use feedlog_core::{FeedlogError, Result};
use tracing::info;

use crate::blob_store::BlobStore;

/// Substrings the lower-cased first line must contain.
pub const REQUIRED_HEADER_FIELDS: [&str; 4] = ["type", "start", "location", "condition"];

/// Validate an upload's first line against [`REQUIRED_HEADER_FIELDS`].
///
/// The error names every missing field so the caller can surface a precise
/// message.
pub fn validate_upload(content: &str) -> Result<()> {
    let first_line = content.lines().next().unwrap_or("").to_lowercase();

    let missing: Vec<&str> = REQUIRED_HEADER_FIELDS
        .iter()
        .copied()
        .filter(|field| !first_line.contains(field))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FeedlogError::InvalidUploadHeader(missing.join(", ")))
    }
}

/// Validate then store an upload under `name`.
pub fn store_upload<S: BlobStore>(store: &S, name: &str, content: &str) -> Result<()> {
    validate_upload(content)?;
    store.put(name, content)?;
    info!(name, bytes = content.len(), "upload stored");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
