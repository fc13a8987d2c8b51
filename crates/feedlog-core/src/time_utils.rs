use std::cmp::Ordering;

use chrono::NaiveDate;

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Date formats seen in feeding-log exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];

/// Parse a calendar date from a loosely-formatted log field.
///
/// Returns `None` for empty strings or unrecognised formats. The original
/// string is always preserved in output; parsing exists only so that
/// ordering works across month and year boundaries.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Calendar-date comparison with a lexicographic fallback.
///
/// When both sides parse, the parsed dates are compared; otherwise the raw
/// strings are, so sorting terminates regardless of input quality.
pub fn cmp_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(da), Some(db)) => da.cmp(&db),
        _ => a.cmp(b),
    }
}

// ── Start-field decomposition ─────────────────────────────────────────────────

/// Split a `Start` field on the first space into `(date, time)`.
///
/// When no space is present the whole field is the date and the time
/// defaults to `"00:00"`.
pub fn split_start(start: &str) -> (String, String) {
    let trimmed = start.trim();
    match trimmed.split_once(' ') {
        Some((date, time)) => (date.to_string(), time.trim().to_string()),
        None => (trimmed.to_string(), "00:00".to_string()),
    }
}

/// Hour of day from an `HH:MM`-style string: the integer before the first
/// colon. Returns `None` when that portion is not an integer in `0..=23`.
pub fn hour_of(time: &str) -> Option<u32> {
    let head = time.split(':').next()?;
    let hour: u32 = head.trim().parse().ok()?;
    (hour <= 23).then_some(hour)
}

/// Minutes since midnight for ordering purposes. Best-effort: a missing or
/// unparseable minute component counts as 0.
pub fn time_minutes(time: &str) -> u32 {
    let mut parts = time.split(':');
    let hours: u32 = parts
        .next()
        .and_then(|h| h.trim().parse().ok())
        .unwrap_or(0);
    let minutes: u32 = parts
        .next()
        .and_then(|m| m.trim().parse().ok())
        .unwrap_or(0);
    hours * 60 + minutes
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_iso() {
        let d = parse_date("2023-03-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_date_slash_formats() {
        assert_eq!(
            parse_date("2023/03/01"),
            NaiveDate::from_ymd_opt(2023, 3, 1)
        );
        assert_eq!(
            parse_date("3/1/2023"),
            NaiveDate::from_ymd_opt(2023, 3, 1)
        );
        assert_eq!(parse_date("3/1/23"), NaiveDate::from_ymd_opt(2023, 3, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2023-13-40").is_none());
    }

    // ── cmp_dates ─────────────────────────────────────────────────────────────

    #[test]
    fn test_cmp_dates_calendar_order_across_year() {
        // Lexicographically "1/5/2024" < "12/28/2023" but chronologically after.
        assert_eq!(cmp_dates("12/28/2023", "1/5/2024"), Ordering::Less);
    }

    #[test]
    fn test_cmp_dates_falls_back_to_string_compare() {
        assert_eq!(cmp_dates("abc", "abd"), Ordering::Less);
        assert_eq!(cmp_dates("abc", "abc"), Ordering::Equal);
    }

    // ── split_start ───────────────────────────────────────────────────────────

    #[test]
    fn test_split_start_with_time() {
        let (date, time) = split_start("2023-03-01 08:15");
        assert_eq!(date, "2023-03-01");
        assert_eq!(time, "08:15");
    }

    #[test]
    fn test_split_start_without_time_defaults_to_midnight() {
        let (date, time) = split_start("2023-03-01");
        assert_eq!(date, "2023-03-01");
        assert_eq!(time, "00:00");
    }

    #[test]
    fn test_split_start_only_first_space_splits() {
        // Anything after the first space belongs to the time portion.
        let (date, time) = split_start("2023-03-01 08:15 AM");
        assert_eq!(date, "2023-03-01");
        assert_eq!(time, "08:15 AM");
    }

    // ── hour_of ───────────────────────────────────────────────────────────────

    #[test]
    fn test_hour_of_valid() {
        assert_eq!(hour_of("08:15"), Some(8));
        assert_eq!(hour_of("23:59"), Some(23));
        assert_eq!(hour_of("0:05"), Some(0));
    }

    #[test]
    fn test_hour_of_out_of_range() {
        assert_eq!(hour_of("24:00"), None);
        assert_eq!(hour_of("99:00"), None);
    }

    #[test]
    fn test_hour_of_unparseable() {
        assert_eq!(hour_of("noon"), None);
        assert_eq!(hour_of(""), None);
    }

    // ── time_minutes ──────────────────────────────────────────────────────────

    #[test]
    fn test_time_minutes() {
        assert_eq!(time_minutes("00:00"), 0);
        assert_eq!(time_minutes("08:15"), 495);
        assert_eq!(time_minutes("23:59"), 1439);
    }

    #[test]
    fn test_time_minutes_best_effort() {
        assert_eq!(time_minutes("8"), 480);
        assert_eq!(time_minutes("garbage"), 0);
    }
}
