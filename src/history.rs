//! Month/year filtering over a loaded history snapshot.
//!
//! Filtering is by exact string match on the slash-delimited components
//! of the display stamp, not by calendar arithmetic: callers supply the
//! zero-padded two-digit month and the four-digit year as strings.

use crate::storage::ComplaintRecord;

/// Filter records by display-stamp month (`"MM"`) and year (`"YYYY"`).
///
/// An unset filter component matches everything. Records whose
/// `created_at` has fewer than three slash-delimited components are
/// skipped regardless of the filter values.
pub fn filter_by_period<'a>(
    records: &'a [ComplaintRecord],
    month: Option<&str>,
    year: Option<&str>,
) -> Vec<&'a ComplaintRecord> {
    records
        .iter()
        .filter(|r| matches_period(r, month, year))
        .collect()
}

fn matches_period(record: &ComplaintRecord, month: Option<&str>, year: Option<&str>) -> bool {
    let parts: Vec<&str> = record.created_at.split('/').collect();
    if parts.len() < 3 {
        return false;
    }

    let record_month = parts[1];
    let record_year = parts[2].split(' ').next().unwrap_or("");

    month.map_or(true, |m| record_month == m) && year.map_or(true, |y| record_year == y)
}
