//! Daily and time-of-day aggregation of bottle-feed events.
//!
//! Both aggregations are the same fold: build a mapping from bucket key to
//! a mutable accumulator, then project to a list ordered by the bucket's
//! natural order (calendar date, or slot order of the day).

use std::collections::HashMap;

use feedlog_core::calculations::round1;
use feedlog_core::models::{DailyStat, FeedEvent, TimeSlot, TimeSlotStat};
use feedlog_core::time_utils::cmp_dates;

// ── Accumulator ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    count: u32,
    total: u32,
}

impl Acc {
    fn add(&mut self, amount: u32) {
        self.count += 1;
        self.total += amount;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round1(f64::from(self.total) / f64::from(self.count))
    }
}

// ── Daily aggregation ─────────────────────────────────────────────────────────

/// Group events by calendar date.
///
/// Returns one [`DailyStat`] per distinct date, sorted ascending by
/// calendar-date comparison (not string comparison, so ordering holds
/// across month and year boundaries).
pub fn aggregate_daily(events: &[FeedEvent]) -> Vec<DailyStat> {
    let mut map: HashMap<String, Acc> = HashMap::new();
    for event in events {
        map.entry(event.date.clone()).or_default().add(event.amount);
    }

    let mut stats: Vec<DailyStat> = map
        .into_iter()
        .map(|(date, acc)| DailyStat {
            date,
            feed_count: acc.count,
            total_amount: acc.total,
            average_amount: acc.average(),
        })
        .collect();

    stats.sort_by(|a, b| cmp_dates(&a.date, &b.date));
    stats
}

// ── Time-of-day aggregation ───────────────────────────────────────────────────

/// Partition events into the four fixed 6-hour slots.
///
/// Always returns exactly four entries in day order; empty slots carry
/// zeroes. `percentage` is each slot's share of the total event count.
pub fn aggregate_time_slots(events: &[FeedEvent]) -> Vec<TimeSlotStat> {
    let mut accs = [Acc::default(); 4];
    for event in events {
        accs[TimeSlot::from_hour(event.hour).index()].add(event.amount);
    }

    let total_count = events.len() as f64;
    TimeSlot::ALL
        .iter()
        .map(|slot| {
            let acc = accs[slot.index()];
            let percentage = if total_count == 0.0 {
                0.0
            } else {
                round1(f64::from(acc.count) / total_count * 100.0)
            };
            TimeSlotStat {
                slot: slot.label().to_string(),
                count: acc.count,
                total_amount: acc.total,
                average_amount: acc.average(),
                percentage,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
