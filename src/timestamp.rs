//! Coercion of raw date representations into UTC timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// Date formats tried, in order, after RFC 3339.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
];

/// Conversion into a UTC timestamp.
///
/// Integers are milliseconds since the Unix epoch. Strings are parsed as
/// RFC 3339 first and then against [`DATE_FORMATS`]; naive values are taken as UTC.
pub trait IntoTimestamp {
    fn into_timestamp(self) -> Option<DateTime<Utc>>;
}

impl IntoTimestamp for DateTime<Utc> {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        Some(self)
    }
}

impl IntoTimestamp for &DateTime<Utc> {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

impl IntoTimestamp for DateTime<FixedOffset> {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        Some(self.and_utc())
    }
}

impl IntoTimestamp for NaiveDate {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        Some(self.and_hms_opt(0, 0, 0)?.and_utc())
    }
}

impl IntoTimestamp for i64 {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self)
    }
}

impl IntoTimestamp for u64 {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        i64::try_from(self).ok()?.into_timestamp()
    }
}

impl IntoTimestamp for &str {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        parse_timestamp(self)
    }
}

impl IntoTimestamp for String {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self)
    }
}

impl IntoTimestamp for &String {
    fn into_timestamp(self) -> Option<DateTime<Utc>> {
        parse_timestamp(self)
    }
}

/// Parse a date string into a UTC timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for &fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// Signed number of whole milliseconds elapsed from `from` to `to`.
///
/// Sub-millisecond parts are dropped.
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta: TimeDelta = to - from;
    delta.num_milliseconds() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = "2024-03-01T12:00:00+02:00".into_timestamp().unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn parses_plain_date_as_midnight_utc() {
        let ts = "2024-03-01".into_timestamp().unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn integers_are_epoch_millis() {
        let ts = 1_500i64.into_timestamp().unwrap();
        assert_eq!(ts.timestamp_millis(), 1_500);
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!("not a date".into_timestamp().is_none());
        assert!("".into_timestamp().is_none());
    }

    #[test]
    fn millis_between_keeps_sign() {
        let a = 0i64.into_timestamp().unwrap();
        let b = 2_500i64.into_timestamp().unwrap();
        assert_eq!(millis_between(a, b), 2_500.0);
        assert_eq!(millis_between(b, a), -2_500.0);
    }
}
