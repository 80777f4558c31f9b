use chrono::{NaiveDate, NaiveDateTime};

/// Canonical output format for approach times, e.g. `2020-01-01 00:00`.
pub const APPROACH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted input layouts, tried in order. The first is the CAD calendar
/// form (`1900-Jan-01 00:11`).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%b-%d %H:%M",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%b-%d", "%Y-%m-%d"];

/// Parse a close-approach calendar time.
///
/// Date-only values resolve to midnight. Returns `None` when no known layout
/// matches.
///
/// # Example
/// ```
/// use neo_ingest::time::parse_approach_time;
/// let t = parse_approach_time("1900-Jan-01 00:11").unwrap();
/// assert_eq!(t.to_string(), "1900-01-01 00:11:00");
/// ```
pub fn parse_approach_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Format a time in the canonical `YYYY-MM-DD HH:MM` form.
pub fn datetime_to_str(time: &NaiveDateTime) -> String {
    time.format(APPROACH_TIME_FORMAT).to_string()
}
