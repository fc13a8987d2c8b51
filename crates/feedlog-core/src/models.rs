use serde::{Deserialize, Serialize};

use crate::time_utils::{cmp_dates, time_minutes};

/// A single bottle-feed extracted from one raw log row.
///
/// Events are value objects: created by the extractor, consumed by the
/// aggregators, and never mutated afterwards. `amount` is always positive
/// and `hour` always falls in `0..=23` (rows violating either are dropped
/// during extraction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    /// Calendar date exactly as it appears in the source `Start` field.
    pub date: String,
    /// Wall-clock time in `HH:MM` form (defaults to `"00:00"` when absent).
    pub time: String,
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Feed volume in milliliters.
    pub amount: u32,
}

impl FeedEvent {
    /// Chronological ordering: calendar-date comparison composed with
    /// wall-clock minutes. Unparseable dates fall back to lexicographic
    /// comparison so sorting always terminates.
    pub fn chronological_cmp(&self, other: &Self) -> std::cmp::Ordering {
        cmp_dates(&self.date, &other.date)
            .then_with(|| time_minutes(&self.time).cmp(&time_minutes(&other.time)))
    }
}

/// Aggregate of all feeds on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    /// Number of bottle-feed events on this date, always >= 1.
    pub feed_count: u32,
    /// Sum of feed volumes in milliliters.
    pub total_amount: u32,
    /// `total_amount / feed_count`, rounded to 1 decimal.
    pub average_amount: f64,
}

/// Comparison of two adjacent 7-day windows of daily average volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Mean daily average over the most recent 7 days, rounded to 1 decimal.
    pub recent_average: f64,
    /// Mean daily average over the 7 days before those, rounded to 1 decimal.
    pub older_average: f64,
    /// `(recent - older) / older * 100`, rounded to 1 decimal.
    pub percent_change: f64,
}

/// One trend comparison anchored to a specific day of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendHistoryEntry {
    /// The anchor date (last day of the "recent" window).
    pub date: String,
    /// Percent change for the window ending on `date`.
    pub value: f64,
    pub recent_avg: f64,
    pub older_avg: f64,
}

/// One of the four fixed 6-hour windows of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    /// `[0, 6)` — labeled `12am-6am`.
    Night,
    /// `[6, 12)` — labeled `6am-12pm`.
    Morning,
    /// `[12, 18)` — labeled `12pm-6pm`.
    Afternoon,
    /// `[18, 24)` — labeled `6pm-12am`.
    Evening,
}

impl TimeSlot {
    /// All slots in their natural order of the day.
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Night,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    /// Assign an hour of day (0–23) to its slot. Total partition: every
    /// valid hour maps to exactly one slot.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeSlot::Night,
            6..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            _ => TimeSlot::Evening,
        }
    }

    /// The display label used in serialized output.
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Night => "12am-6am",
            TimeSlot::Morning => "6am-12pm",
            TimeSlot::Afternoon => "12pm-6pm",
            TimeSlot::Evening => "6pm-12am",
        }
    }

    /// Index of this slot within [`TimeSlot::ALL`].
    pub fn index(self) -> usize {
        match self {
            TimeSlot::Night => 0,
            TimeSlot::Morning => 1,
            TimeSlot::Afternoon => 2,
            TimeSlot::Evening => 3,
        }
    }
}

/// Aggregate of all feeds falling into one time-of-day slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotStat {
    /// Slot label, e.g. `"6am-12pm"`.
    pub slot: String,
    pub count: u32,
    pub total_amount: u32,
    /// `total_amount / count`, rounded to 1 decimal (0.0 for empty slots).
    pub average_amount: f64,
    /// Share of the total event count, rounded to 1 decimal.
    pub percentage: f64,
}

/// First and last event dates of the analyzed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

/// Whole-series totals and averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_bottle_feeds: u32,
    pub date_range: DateRange,
    /// Events per distinct date, rounded to 1 decimal.
    pub average_daily_feeds: f64,
    /// Mean volume per feed in milliliters, rounded to 1 decimal.
    pub average_feed_size: f64,
}

/// The complete, JSON-serializable output of one analysis run.
///
/// Built fresh per invocation; two runs over identical input differ only
/// in `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_stats: OverallStats,
    /// Latest 7-day vs prior-7-day comparison; `null` with fewer than
    /// 14 days of data.
    pub recent_trend: Option<TrendPoint>,
    /// The last 7 daily stats (most recent week).
    pub daily_stats: Vec<DailyStat>,
    /// All daily stats, ascending by calendar date.
    pub all_stats: Vec<DailyStat>,
    /// Exactly four entries, one per [`TimeSlot`] in day order.
    pub time_stats: Vec<TimeSlotStat>,
    /// All extracted events in chronological order.
    pub raw_feeds: Vec<FeedEvent>,
    /// Rolling trend, one entry per day from the 14th day onward.
    pub trend_history: Vec<TrendHistoryEntry>,
    /// Body weight (kg) the recommendation was computed from.
    pub baby_weight: f64,
    /// `baby_weight * 150` ml/day.
    pub recommended_intake: f64,
    /// RFC 3339 generation time.
    pub timestamp: String,
}
