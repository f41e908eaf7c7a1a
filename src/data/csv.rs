//! Naive CSV parsing for the game's exported tables.
//!
//! The format is deliberately simple: comma-split only, no quoting or escaped
//! commas (the exports never contain them), header line first, then rows
//! zipped positionally with the header names. Changing this to a quoting
//! parser would alter how existing exports load, so the limitation stays.

use crate::data::record::Record;

/// Parse CSV text into records.
///
/// A line is dropped only when every comma-split field trims to empty; a row
/// with at least one non-empty field is kept even if other fields are blank.
/// Short rows simply lack their trailing columns. Returns None when there is
/// no header line at all.
pub fn parse_csv(text: &str) -> Option<Vec<Record>> {
    let mut lines = text.trim().lines();
    let header_line = lines.next()?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return None;
    }

    let records = lines
        .map(str::trim)
        .filter(|line| line.split(',').any(|value| !value.trim().is_empty()))
        .map(|line| {
            let values = line.split(',');
            Record::from_pairs(headers.iter().map(String::as_str).zip(values))
        })
        .collect();
    Some(records)
}
