//! Runtime collaborator layer for Feedlog.
//!
//! Everything with a side effect lives here: the blob store the raw logs
//! are fetched from and uploaded to, the best-effort insight generation,
//! and the service that wires fetch → analyze together. The analysis
//! pipeline itself stays pure in `feedlog-data`.

pub mod blob_store;
pub mod insights;
pub mod service;
pub mod upload;

pub use feedlog_core as core;
pub use feedlog_data as data;
