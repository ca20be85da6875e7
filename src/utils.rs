//! Small helpers for dates, filenames, logging and the key prompt.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use std::io::{self, BufRead, Write};

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Inclusive lower bound on publish date for a `days` window, as `YYYY-MM-DD`.
///
/// `today` is passed in so callers (and tests) control the clock.
/// Returns `None` when the window reaches past the earliest representable date.
pub fn since_date(today: NaiveDate, days: u32) -> Option<String> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Snapshot filename derived from `now`, e.g. `20250115_093000.json`.
pub fn timestamped_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// ISO-8601 local timestamp with second resolution.
pub fn iso_timestamp(now: &DateTime<Local>) -> String {
    now.to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}

/// Ask for the NewsAPI key on `output` and read one line from `input`.
///
/// # Returns
///
/// The trimmed key, or `None` if the line was empty or input was closed.
pub fn prompt_api_key<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<String>> {
    write!(output, "Enter your NewsAPI key: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}
