//! Core domain types and calculations for Feedlog.
//!
//! Contains the data model shared by every layer, the error taxonomy,
//! numeric helpers (rounding, trend percentages, recommended intake),
//! tolerant date/time parsing for loosely-structured log fields, and the
//! CLI settings.

pub mod calculations;
pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{FeedlogError, Result};
