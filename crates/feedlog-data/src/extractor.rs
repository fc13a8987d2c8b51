//! Bottle-feed filtering and field extraction.
//!
//! Selects rows whose location marks them as bottle-delivered, pulls a
//! volume out of the free-text condition field, and decomposes the start
//! timestamp into date, time and hour. Row-level problems are absorbed
//! (debug-logged) rather than propagated; only a fully empty result is an
//! error.

use feedlog_core::models::FeedEvent;
use feedlog_core::time_utils::{hour_of, split_start};
use feedlog_core::{FeedlogError, Result};
use regex::Regex;
use tracing::debug;

use crate::parser::{split_fields, Header};

/// Substring that marks a location field as a bottle feed. Case-sensitive
/// substring match, not equality: `"Bottle (expressed)"` qualifies.
const BOTTLE_MARKER: &str = "Bottle";

// ── Volume extraction ─────────────────────────────────────────────────────────

/// Extract the first contiguous run of decimal digits anywhere in the
/// condition field as the volume in milliliters.
///
/// Deliberately loose: `"120ml"`, `"approx 120"` and `"120 ml remaining"`
/// all yield 120. No digits (or an absurd overflowing run) yields 0, which
/// drops the row downstream.
pub fn extract_volume(condition: &str) -> u32 {
    let re = Regex::new(r"\d+").expect("regex is valid");
    re.find(condition)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

// ── Event extraction ──────────────────────────────────────────────────────────

/// Extract all bottle-feed events from the data rows, sorted chronologically.
///
/// `rows` is the full row list including the header (row 0), as produced by
/// [`crate::parser::split_rows`]. Returns [`FeedlogError::NoUsableData`]
/// when zero events survive filtering.
pub fn extract_events(rows: &[&str], header: &Header) -> Result<Vec<FeedEvent>> {
    let min_fields = header.max_required_idx() + 1;
    let mut events: Vec<FeedEvent> = Vec::new();

    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.trim().is_empty() {
            continue;
        }

        let fields = split_fields(row);
        if fields.len() < min_fields {
            debug!(line = i + 1, fields = fields.len(), "skipping short row");
            continue;
        }

        if !fields[header.location_idx].contains(BOTTLE_MARKER) {
            continue;
        }

        let amount = extract_volume(&fields[header.condition_idx]);
        if amount == 0 {
            debug!(line = i + 1, "skipping row with no extractable volume");
            continue;
        }

        let (date, time) = split_start(&fields[header.start_idx]);
        if date.is_empty() {
            debug!(line = i + 1, "skipping row with empty date");
            continue;
        }
        let Some(hour) = hour_of(&time) else {
            debug!(line = i + 1, time = %time, "skipping row with unusable time");
            continue;
        };

        events.push(FeedEvent {
            date,
            time,
            hour,
            amount,
        });
    }

    if events.is_empty() {
        return Err(FeedlogError::NoUsableData);
    }

    events.sort_by(|a, b| a.chronological_cmp(b));
    debug!(events = events.len(), "extracted bottle-feed events");

    Ok(events)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
