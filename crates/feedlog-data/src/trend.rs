//! Sliding-window trend analysis over the daily statistics series.
//!
//! Both computations compare the mean daily average volume of a 7-day
//! window against the 7 days before it, and both require at least 14 days
//! of data to say anything at all.

use feedlog_core::calculations::{mean, percent_change, round1};
use feedlog_core::models::{DailyStat, TrendHistoryEntry, TrendPoint};

/// Width of one comparison window, in days.
pub const TREND_WINDOW: usize = 7;

/// Minimum number of daily stats before any trend is produced.
pub const MIN_TREND_DAYS: usize = 2 * TREND_WINDOW;

/// Mean of `average_amount` over a window of daily stats.
fn window_average(window: &[DailyStat]) -> f64 {
    let values: Vec<f64> = window.iter().map(|s| s.average_amount).collect();
    mean(&values)
}

/// Build one trend point from the 14 stats ending at index `end` (inclusive).
///
/// Returns `None` when the older window's average is 0, in which case the
/// comparison is undefined and no trend is emitted.
fn trend_at(stats: &[DailyStat], end: usize) -> Option<(f64, f64, f64)> {
    let recent = window_average(&stats[end + 1 - TREND_WINDOW..=end]);
    let older = window_average(&stats[end + 1 - MIN_TREND_DAYS..=end - TREND_WINDOW]);
    let pct = percent_change(recent, older)?;
    Some((recent, older, pct))
}

/// The latest 7-day vs prior-7-day comparison.
///
/// `None` when fewer than [`MIN_TREND_DAYS`] stats exist or the older
/// window averages 0.
pub fn recent_trend(stats: &[DailyStat]) -> Option<TrendPoint> {
    if stats.len() < MIN_TREND_DAYS {
        return None;
    }
    let (recent, older, pct) = trend_at(stats, stats.len() - 1)?;
    Some(TrendPoint {
        recent_average: round1(recent),
        older_average: round1(older),
        percent_change: pct,
    })
}

/// The full rolling trend: one entry anchored to every day from the 14th
/// onward, `len - 13` entries when `len >= 14`, otherwise empty.
pub fn trend_history(stats: &[DailyStat]) -> Vec<TrendHistoryEntry> {
    if stats.len() < MIN_TREND_DAYS {
        return Vec::new();
    }

    (MIN_TREND_DAYS - 1..stats.len())
        .filter_map(|i| {
            let (recent, older, pct) = trend_at(stats, i)?;
            Some(TrendHistoryEntry {
                date: stats[i].date.clone(),
                value: pct,
                recent_avg: round1(recent),
                older_avg: round1(older),
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// One stat per day of March 2023, with the given daily averages.
    fn series(averages: &[f64]) -> Vec<DailyStat> {
        averages
            .iter()
            .enumerate()
            .map(|(i, &avg)| DailyStat {
                date: format!("2023-03-{:02}", i + 1),
                feed_count: 1,
                total_amount: avg as u32,
                average_amount: avg,
            })
            .collect()
    }

    // ── recent_trend ──────────────────────────────────────────────────────────

    #[test]
    fn test_recent_trend_requires_14_days() {
        assert!(recent_trend(&series(&[100.0; 13])).is_none());
        assert!(recent_trend(&series(&[100.0; 14])).is_some());
    }

    #[test]
    fn test_recent_trend_flat_series_is_zero_change() {
        let trend = recent_trend(&series(&[100.0; 14])).unwrap();
        assert_eq!(trend.recent_average, 100.0);
        assert_eq!(trend.older_average, 100.0);
        assert_eq!(trend.percent_change, 0.0);
    }

    #[test]
    fn test_recent_trend_increase() {
        // Older week averages 100, recent week averages 110 → +10%.
        let mut averages = vec![100.0; 7];
        averages.extend_from_slice(&[110.0; 7]);
        let trend = recent_trend(&series(&averages)).unwrap();
        assert_eq!(trend.recent_average, 110.0);
        assert_eq!(trend.older_average, 100.0);
        assert_eq!(trend.percent_change, 10.0);
    }

    #[test]
    fn test_recent_trend_decrease() {
        let mut averages = vec![120.0; 7];
        averages.extend_from_slice(&[90.0; 7]);
        let trend = recent_trend(&series(&averages)).unwrap();
        assert_eq!(trend.percent_change, -25.0);
    }

    #[test]
    fn test_recent_trend_uses_last_14_of_longer_series() {
        // 6 noise days, then 7 at 100, then 7 at 105.
        let mut averages = vec![999.0; 6];
        averages.extend_from_slice(&[100.0; 7]);
        averages.extend_from_slice(&[105.0; 7]);
        let trend = recent_trend(&series(&averages)).unwrap();
        assert_eq!(trend.older_average, 100.0);
        assert_eq!(trend.recent_average, 105.0);
        assert_eq!(trend.percent_change, 5.0);
    }

    #[test]
    fn test_recent_trend_zero_older_average_is_none() {
        // Degenerate series with a zero older window: no trend rather than
        // a non-finite value.
        let mut averages = vec![0.0; 7];
        averages.extend_from_slice(&[100.0; 7]);
        assert!(recent_trend(&series(&averages)).is_none());
    }

    // ── trend_history ─────────────────────────────────────────────────────────

    #[test]
    fn test_trend_history_empty_below_14_days() {
        assert!(trend_history(&series(&[100.0; 13])).is_empty());
    }

    #[test]
    fn test_trend_history_exactly_14_days_has_one_entry() {
        let history = trend_history(&series(&[100.0; 14]));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, "2023-03-14");
        assert_eq!(history[0].value, 0.0);
    }

    #[test]
    fn test_trend_history_length_is_len_minus_13() {
        for len in [14usize, 15, 20, 31] {
            let history = trend_history(&series(&vec![100.0; len]));
            assert_eq!(history.len(), len - 13, "len = {len}");
        }
    }

    #[test]
    fn test_trend_history_anchored_to_window_end_dates() {
        let history = trend_history(&series(&[100.0; 16]));
        let dates: Vec<&str> = history.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-03-14", "2023-03-15", "2023-03-16"]);
    }

    #[test]
    fn test_trend_history_tracks_shifting_windows() {
        // Days 1–7 at 100, days 8–15 at 110. The first anchor (day 14) compares
        // days 8–14 (all 110) against days 1–7 (all 100): +10%. The second
        // anchor (day 15) compares days 9–15 (110) against days 2–8 (≈101.43).
        let mut averages = vec![100.0; 7];
        averages.extend_from_slice(&[110.0; 8]);
        let history = trend_history(&series(&averages));

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, 10.0);
        assert_eq!(history[0].recent_avg, 110.0);
        assert_eq!(history[0].older_avg, 100.0);
        // (110 - 101.4286) / 101.4286 * 100 = 8.4507 → 8.5
        assert_eq!(history[1].older_avg, 101.4);
        assert_eq!(history[1].value, 8.5);
    }

    #[test]
    fn test_trend_history_matches_recent_trend_at_last_entry() {
        let averages: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let stats = series(&averages);

        let history = trend_history(&stats);
        let latest = recent_trend(&stats).unwrap();

        let last = history.last().unwrap();
        assert_eq!(last.value, latest.percent_change);
        assert_eq!(last.recent_avg, latest.recent_average);
        assert_eq!(last.older_avg, latest.older_average);
    }
}
