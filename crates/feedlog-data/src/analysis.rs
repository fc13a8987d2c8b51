//! Top-level analysis pipeline for Feedlog.
//!
//! Runs the parse → extract → aggregate → trend chain over a raw text blob
//! and assembles the complete [`AnalysisResult`]. Pure and synchronous: the
//! same input text and config always yield the same result apart from the
//! generation timestamp.

use chrono::Utc;
use feedlog_core::calculations::{recommended_intake_ml, round1, AnalysisConfig};
use feedlog_core::models::{AnalysisResult, DailyStat, DateRange, FeedEvent, OverallStats};
use feedlog_core::Result;
use tracing::debug;

use crate::aggregator::{aggregate_daily, aggregate_time_slots};
use crate::extractor::extract_events;
use crate::parser::{split_rows, Header};
use crate::trend::{recent_trend, trend_history};

/// Number of trailing daily stats exposed as the "recent week" view.
const RECENT_DAYS: usize = 7;

/// Run the full pipeline over a raw feeding-log blob.
///
/// Fails with a structural error (missing columns, fewer than 2 rows) or
/// with [`feedlog_core::FeedlogError::NoUsableData`] when no bottle-feed
/// events survive filtering; no partial result is ever returned.
pub fn analyze_feeds(raw: &str, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let rows = split_rows(raw);
    let header = Header::parse(&rows)?;
    let events = extract_events(&rows, &header)?;

    let all_stats = aggregate_daily(&events);
    let time_stats = aggregate_time_slots(&events);
    let recent = recent_trend(&all_stats);
    let history = trend_history(&all_stats);
    let overall = build_overall_stats(&events, &all_stats);

    debug!(
        events = events.len(),
        days = all_stats.len(),
        has_trend = recent.is_some(),
        "analysis complete"
    );

    let daily_stats = all_stats
        .iter()
        .skip(all_stats.len().saturating_sub(RECENT_DAYS))
        .cloned()
        .collect();

    Ok(AnalysisResult {
        overall_stats: overall,
        recent_trend: recent,
        daily_stats,
        all_stats,
        time_stats,
        raw_feeds: events,
        trend_history: history,
        baby_weight: config.baby_weight_kg,
        recommended_intake: recommended_intake_ml(config.baby_weight_kg),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Whole-series totals from the sorted event list and daily stats.
///
/// `events` is non-empty here (extraction errors out otherwise), so the
/// first/last lookups cannot fail.
fn build_overall_stats(events: &[FeedEvent], all_stats: &[DailyStat]) -> OverallStats {
    let total_feeds = events.len() as u32;
    let total_volume: u64 = events.iter().map(|e| u64::from(e.amount)).sum();
    let distinct_dates = all_stats.len().max(1);

    OverallStats {
        total_bottle_feeds: total_feeds,
        date_range: DateRange {
            first: events.first().map(|e| e.date.clone()).unwrap_or_default(),
            last: events.last().map(|e| e.date.clone()).unwrap_or_default(),
        },
        average_daily_feeds: round1(f64::from(total_feeds) / distinct_dates as f64),
        average_feed_size: round1(total_volume as f64 / f64::from(total_feeds.max(1))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
