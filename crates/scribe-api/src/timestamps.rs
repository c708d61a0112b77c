use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Parse a timestamp as stored by SQLite. `datetime('now')` produces
/// "YYYY-MM-DD HH:MM:SS" without a timezone; parse as naive UTC and convert.
/// Falls back to the epoch default on corrupt input rather than failing the
/// whole response.
pub(crate) fn parse_db_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}': {}", raw, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_sqlite_datetime() {
        let ts = parse_db_timestamp("2023-08-07 07:30:02");
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.hour(), 7);
        assert_eq!(ts.second(), 2);
    }

    #[test]
    fn parses_rfc3339() {
        let ts = parse_db_timestamp("2023-08-07T07:30:02Z");
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn corrupt_input_falls_back_to_default() {
        assert_eq!(parse_db_timestamp("not a date"), DateTime::<Utc>::default());
    }
}
