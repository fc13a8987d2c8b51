//! Record parsing for comma-separated feeding logs.
//!
//! Tolerant of quoted fields containing the separator and of unbalanced
//! quoting: the "inside quotes" mode simply persists to the end of the row,
//! so tokenization always terminates.

use feedlog_core::{FeedlogError, Result};

/// The column names the analysis requires, matched exactly.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Type", "Start", "Start Location", "End Condition"];

// ── Row / field splitting ─────────────────────────────────────────────────────

/// Split a raw blob into rows on `\n`. Rows are returned verbatim; blank
/// rows are kept so that line numbers stay meaningful for logging.
pub fn split_rows(raw: &str) -> Vec<&str> {
    raw.split('\n').map(|r| r.trim_end_matches('\r')).collect()
}

/// Tokenize one row into fields.
///
/// A double quote toggles "inside quotes" mode, so a comma inside quotes is
/// not a field boundary. Each field is trimmed of surrounding whitespace and
/// a surrounding quote pair is stripped.
pub fn split_fields(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(finish_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(finish_field(&current));

    fields
}

/// Trim a raw field and strip one surrounding quote pair.
fn finish_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = match trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => inner,
        None => trimmed,
    };
    unquoted.trim().to_string()
}

// ── Header ────────────────────────────────────────────────────────────────────

/// The resolved header row: all column names plus the positions of the four
/// required columns.
#[derive(Debug, Clone)]
pub struct Header {
    /// Every column name in the header row, in order.
    pub columns: Vec<String>,
    /// Position of the `Type` column.
    pub type_idx: usize,
    /// Position of the `Start` column.
    pub start_idx: usize,
    /// Position of the `Start Location` column.
    pub location_idx: usize,
    /// Position of the `End Condition` column.
    pub condition_idx: usize,
}

impl Header {
    /// Resolve the header from the first row of `rows`.
    ///
    /// Fails with a structural error when fewer than 2 rows exist or any
    /// required column is absent; extra columns and arbitrary column order
    /// are tolerated.
    pub fn parse(rows: &[&str]) -> Result<Header> {
        if rows.len() < 2 {
            return Err(FeedlogError::TooFewRows(rows.len()));
        }

        let columns = split_fields(rows[0]);

        let find = |name: &str| -> Result<usize> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| FeedlogError::MissingColumn(name.to_string()))
        };

        Ok(Header {
            type_idx: find(REQUIRED_COLUMNS[0])?,
            start_idx: find(REQUIRED_COLUMNS[1])?,
            location_idx: find(REQUIRED_COLUMNS[2])?,
            condition_idx: find(REQUIRED_COLUMNS[3])?,
            columns,
        })
    }

    /// The highest required column position. Data rows with fewer fields
    /// than this (plus one) cannot be extracted and are skipped.
    pub fn max_required_idx(&self) -> usize {
        self.type_idx
            .max(self.start_idx)
            .max(self.location_idx)
            .max(self.condition_idx)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Type,Start,Start Location,End Condition";

    // ── split_rows ────────────────────────────────────────────────────────────

    #[test]
    fn test_split_rows_newline_separated() {
        let rows = split_rows("a\nb\nc");
        assert_eq!(rows, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_rows_strips_carriage_returns() {
        let rows = split_rows("a\r\nb\r\n");
        assert_eq!(rows, vec!["a", "b", ""]);
    }

    // ── split_fields ──────────────────────────────────────────────────────────

    #[test]
    fn test_split_fields_simple() {
        assert_eq!(
            split_fields("Feed,2023-03-01 08:00,Bottle,120ml"),
            vec!["Feed", "2023-03-01 08:00", "Bottle", "120ml"]
        );
    }

    #[test]
    fn test_split_fields_trims_whitespace() {
        assert_eq!(split_fields("  a , b ,c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_quoted_separator_not_a_boundary() {
        assert_eq!(
            split_fields(r#"Feed,"March 1, 2023 08:00",Bottle,120ml"#),
            vec!["Feed", "March 1, 2023 08:00", "Bottle", "120ml"]
        );
    }

    #[test]
    fn test_split_fields_strips_quote_pair() {
        assert_eq!(split_fields(r#""Bottle""#), vec!["Bottle"]);
    }

    #[test]
    fn test_split_fields_unbalanced_quote_terminates() {
        // The open quote swallows the rest of the row; no panic, no hang.
        let fields = split_fields(r#"Feed,"2023-03-01 08:00,Bottle,120ml"#);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], "Feed");
    }

    #[test]
    fn test_split_fields_empty_row_yields_single_empty_field() {
        assert_eq!(split_fields(""), vec![""]);
    }

    // ── Header::parse ─────────────────────────────────────────────────────────

    #[test]
    fn test_header_parse_canonical_order() {
        let rows = vec![HEADER, "Feed,2023-03-01 08:00,Bottle,120ml"];
        let header = Header::parse(&rows).unwrap();
        assert_eq!(header.type_idx, 0);
        assert_eq!(header.start_idx, 1);
        assert_eq!(header.location_idx, 2);
        assert_eq!(header.condition_idx, 3);
        assert_eq!(header.max_required_idx(), 3);
    }

    #[test]
    fn test_header_parse_order_independent_with_extra_columns() {
        let rows = vec![
            "Duration,End Condition,Type,Notes,Start Location,Start",
            "x",
        ];
        let header = Header::parse(&rows).unwrap();
        assert_eq!(header.condition_idx, 1);
        assert_eq!(header.type_idx, 2);
        assert_eq!(header.location_idx, 4);
        assert_eq!(header.start_idx, 5);
        assert_eq!(header.columns.len(), 6);
    }

    #[test]
    fn test_header_parse_missing_column() {
        let rows = vec!["Type,Start,Start Location", "Feed,2023-03-01,Bottle"];
        let err = Header::parse(&rows).unwrap_err();
        assert!(matches!(err, FeedlogError::MissingColumn(name) if name == "End Condition"));
    }

    #[test]
    fn test_header_parse_exact_name_match() {
        // "start location" (wrong case) must not satisfy "Start Location".
        let rows = vec!["Type,Start,start location,End Condition", "x"];
        let err = Header::parse(&rows).unwrap_err();
        assert!(matches!(err, FeedlogError::MissingColumn(name) if name == "Start Location"));
    }

    #[test]
    fn test_header_parse_too_few_rows() {
        let rows = vec![HEADER];
        let err = Header::parse(&rows).unwrap_err();
        assert!(matches!(err, FeedlogError::TooFewRows(1)));

        let err = Header::parse(&[]).unwrap_err();
        assert!(matches!(err, FeedlogError::TooFewRows(0)));
    }

    #[test]
    fn test_header_parse_quoted_column_names() {
        let rows = vec![
            r#""Type","Start","Start Location","End Condition""#,
            "Feed,2023-03-01 08:00,Bottle,120ml",
        ];
        let header = Header::parse(&rows).unwrap();
        assert_eq!(header.location_idx, 2);
    }
}
