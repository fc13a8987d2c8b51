//! Fetch-then-analyze service over a blob store.
//!
//! Stateless per call: each invocation fetches the named blob and re-runs
//! the full pipeline. Concurrent invocations share nothing.

use feedlog_core::calculations::AnalysisConfig;
use feedlog_core::models::AnalysisResult;
use feedlog_core::Result;
use feedlog_data::analysis::analyze_feeds;
use tracing::{debug, info};

use crate::blob_store::{BlobMetadata, BlobStore};

/// An analysis result together with metadata about the blob it came from.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: BlobMetadata,
}

/// Runs the pipeline against blobs in a store.
pub struct AnalysisService<S: BlobStore> {
    store: S,
    config: AnalysisConfig,
}

impl<S: BlobStore> AnalysisService<S> {
    pub fn new(store: S, config: AnalysisConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the named blob and run the full analysis over it.
    ///
    /// Structural and no-data errors from the pipeline propagate unchanged;
    /// so do store errors. No partial outcome is ever produced.
    pub fn analyze_blob(&self, name: &str) -> Result<AnalysisOutcome> {
        let source = self.store.metadata(name)?;
        debug!(name, size = source.size_bytes, "analyzing blob");

        let raw = self.store.fetch(name)?;
        let result = analyze_feeds(&raw, &self.config)?;

        info!(
            name,
            feeds = result.overall_stats.total_bottle_feeds,
            days = result.all_stats.len(),
            "blob analyzed"
        );

        Ok(AnalysisOutcome { result, source })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
