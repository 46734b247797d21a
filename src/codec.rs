//! Cell codec for the spreadsheet record format.
//!
//! Record cells look like `5-13_27`: a free-form "MM-DD" date, an underscore,
//! and the running count. Sheets maintained by hand carry trailing annotations
//! on the count (`5-13_30(续)`, `5-13_30完`) which are ignored when decoding.
//! Identity cells in the first column are either a bare username or
//! `name(2)` for the user's second cycle.

/// Cell values treated as "no record here" rather than decode failures.
const EMPTY_SENTINELS: [&str; 2] = ["无", "NaN"];

/// Decode a record cell into `(date, count)`.
///
/// Returns `None` for empty/sentinel cells, cells without a `_` separator,
/// and counts that are not an integer once any trailing annotation is
/// stripped. Callers skip `None` cells; a bad cell is never an error.
pub fn decode_record(cell: &str) -> Option<(String, i64)> {
    let cell = cell.trim();
    if cell.is_empty() || EMPTY_SENTINELS.contains(&cell) {
        return None;
    }

    let (date, raw_count) = cell.split_once('_')?;
    let raw_count = raw_count.trim();

    // The count ends at the first non-digit: "30(续)" and "30完" both read 30.
    let digits_end = raw_count
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw_count.len());
    let count: i64 = raw_count[..digits_end].parse().ok()?;

    Some((date.to_string(), count))
}

/// Decode an identity cell into `(username, cycle)`.
///
/// A trailing `(digits)` suffix selects a cycle beyond the first; anything
/// malformed falls back to treating the whole cell as the username with
/// cycle 1. Usernames may contain spaces.
pub fn decode_identity(cell: &str) -> (String, u32) {
    let cell = cell.trim();
    if let Some(open) = cell.rfind('(') {
        if let Some(inner) = cell[open + 1..].strip_suffix(')') {
            if let Ok(cycle) = inner.parse::<u32>() {
                if cycle >= 1 {
                    return (cell[..open].to_string(), cycle);
                }
            }
        }
    }
    (cell.to_string(), 1)
}

/// Encode a record as it appears in a spreadsheet cell.
pub fn encode_record(date: &str, count: i64) -> String {
    format!("{date}_{count}")
}

/// Encode an identity cell; the first cycle is shown as the bare username.
pub fn encode_identity(username: &str, cycle: u32) -> String {
    if cycle <= 1 {
        username.to_string()
    } else {
        format!("{username}({cycle})")
    }
}
