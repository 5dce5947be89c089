use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use tracing::debug;

const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Render an ISO 8601 timestamp (e.g. "2008-02-21T17:15:56-08:00", as found
/// in PDF metadata) as a local, human-readable date and time.
///
/// Accepts RFC 3339, naive date-times (taken as local time) and plain dates.
/// Anything else is returned unchanged.
pub fn format_iso_date(input: &str) -> String {
    match parse_iso(input.trim()) {
        Some(local) => local.format(DISPLAY_FORMAT).to_string(),
        None => {
            debug!(input, "Could not parse ISO date");
            input.to_string()
        }
    }
}

fn parse_iso(s: &str) -> Option<DateTime<Local>> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_returned_unchanged() {
        assert_eq!(format_iso_date(""), "");
        assert_eq!(format_iso_date("not a date"), "not a date");
        assert_eq!(format_iso_date("2024-13-45"), "2024-13-45");
    }

    #[test]
    fn test_rfc3339_converted() {
        let input = "2008-02-21T17:15:56-08:00";
        let expected = DateTime::parse_from_rfc3339(input)
            .unwrap()
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string();
        assert_eq!(format_iso_date(input), expected);
        assert!(format_iso_date(input).contains("2008"));
    }

    #[test]
    fn test_naive_datetime_is_local() {
        assert_eq!(format_iso_date("2021-07-04T09:05:00"), "7/4/2021, 9:05:00 AM");
    }

    #[test]
    fn test_plain_date_is_midnight() {
        assert_eq!(format_iso_date("2020-01-31"), "1/31/2020, 12:00:00 AM");
    }
}
