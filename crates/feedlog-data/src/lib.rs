//! Parsing and aggregation pipeline for Feedlog.
//!
//! Turns a raw feeding-log text blob into derived statistics: per-day
//! totals and averages, week-over-week trend signals, and a time-of-day
//! volume breakdown. The whole pipeline is a pure function of its input
//! text; all I/O lives in `feedlog-runtime`.

pub mod aggregator;
pub mod analysis;
pub mod extractor;
pub mod parser;
pub mod trend;

pub use feedlog_core as core;
