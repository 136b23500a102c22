// Date range rules shared by the timesheet and the summary report.
//
// Rules
// - If either bound is missing, the window is the last 7 days ending now.
// - start > end is rejected.
// - The end day is inclusive: the window extends to end + 1 day, exclusive.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::modules::reporting::core::errors::ReportError;
use crate::shared::core::time_window::TimeWindow;

pub const DEFAULT_WINDOW_DAYS: i64 = 7;

pub fn resolve_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<TimeWindow, ReportError> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => (now - Duration::days(DEFAULT_WINDOW_DAYS), now),
    };
    if start > end {
        return Err(ReportError::InvalidRange { start, end });
    }
    Ok(TimeWindow::new(start, end + Duration::days(1)))
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_date_bound(raw: &str) -> Result<DateTime<Utc>, ReportError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ReportError::InvalidDate(raw.to_string()))
}
