//! Timestamp formatting and lenient parsing.

use alloc::string::String;
use core::fmt::Write;

use aj_reflect::registry::DEFAULT_DATETIME_FORMAT;
use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

/// The key of the legacy timestamp object.
pub const LEGACY_DATETIME_KEY: &str = "__date_time__";

/// Formats `value` with `format`, falling back to the default format when
/// `format` is not a valid pattern.
///
/// ```rust
/// # use aj_codec::datetime::format_datetime;
/// # use chrono::NaiveDate;
/// let value = NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(5, 30, 0).unwrap();
/// assert_eq!(format_datetime(&value, "%Y/%m/%d"), "2000/02/01");
/// assert_eq!(format_datetime(&value, "%Q"), "2000-02-01T05:30:00");
/// ```
pub fn format_datetime(value: &NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", value.format(format)).is_err() {
        log::trace!("invalid datetime format `{format}`, using the default one");
        out.clear();
        // The default pattern is always valid.
        let _ = write!(out, "{}", value.format(DEFAULT_DATETIME_FORMAT));
    }
    out
}

/// Parses `text` with `format`.
///
/// Missing components default to January, the first day and midnight.
/// The year is mandatory. Dates given as an ordinal (`%j`) or a week
/// (`%V`, `%U`, `%W`) keep their own month and day.
///
/// ```rust
/// # use aj_codec::datetime::parse_datetime;
/// # use chrono::NaiveDate;
/// let feb_1 = NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(parse_datetime("2000-032", "%Y-%j"), Some(feb_1));
/// ```
///
/// ```rust
/// # use aj_codec::datetime::parse_datetime;
/// # use chrono::NaiveDate;
/// let parsed = parse_datetime("2000/02", "%Y/%m").unwrap();
/// assert_eq!(parsed, NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
/// assert!(parse_datetime("02/01", "%m/%d").is_none());
/// ```
pub fn parse_datetime(text: &str, format: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;

    // Each setter fails without effect when the component was parsed.
    let week_or_ordinal = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !week_or_ordinal {
        let _ = parsed.set_month(1);
        let _ = parsed.set_day(1);
    }
    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);

    parsed.to_naive_datetime_with_offset(0).ok()
}

/// Builds `{"__date_time__": <epoch millis>}`.
pub fn to_legacy(value: &NaiveDateTime) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(
        LEGACY_DATETIME_KEY.into(),
        Value::from(value.and_utc().timestamp_millis()),
    );
    Value::Object(object)
}

/// Reads a legacy timestamp object.
///
/// ```rust
/// # use aj_codec::datetime::{from_legacy, to_legacy};
/// # use chrono::NaiveDate;
/// let value = NaiveDate::from_ymd_opt(2001, 9, 9).unwrap().and_hms_milli_opt(1, 46, 40, 5).unwrap();
/// let Some(object) = to_legacy(&value).as_object().cloned() else { unreachable!() };
/// assert_eq!(from_legacy(&object), Some(value));
/// ```
pub fn from_legacy(object: &Map<String, Value>) -> Option<NaiveDateTime> {
    if object.len() != 1 {
        return None;
    }
    let millis = object.get(LEGACY_DATETIME_KEY)?.as_i64()?;
    DateTime::from_timestamp_millis(millis).map(|value| value.naive_utc())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use aj_reflect::registry::DEFAULT_DATETIME_FORMAT;
    use chrono::NaiveDate;

    use super::{format_datetime, parse_datetime};

    #[test]
    fn default_format_round_trip() {
        let value = NaiveDate::from_ymd_opt(2021, 12, 31)
            .unwrap()
            .and_hms_micro_opt(23, 59, 58, 123_456)
            .unwrap();
        let text = format_datetime(&value, DEFAULT_DATETIME_FORMAT);
        assert_eq!(text, "2021-12-31T23:59:58.123456");
        assert_eq!(parse_datetime(&text, DEFAULT_DATETIME_FORMAT), Some(value));
    }

    #[test]
    fn missing_components_are_defaulted() {
        let date = parse_datetime("2000/02/01", "%Y/%m/%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());

        let year = parse_datetime("1999", "%Y").unwrap();
        assert_eq!(year, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());

        let time = parse_datetime("2000-01-02 07:08", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(time, NaiveDate::from_ymd_opt(2000, 1, 2).unwrap().and_hms_opt(7, 8, 0).unwrap());
    }

    #[test]
    fn ordinal_and_week_dates() {
        let feb_1 = NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_datetime("2000-032", "%Y-%j"), Some(feb_1));
        assert_eq!(parse_datetime("2000-W05-2", "%G-W%V-%u"), Some(feb_1));

        let noon = parse_datetime("2000-032 12", "%Y-%j %H").unwrap();
        assert_eq!(noon, NaiveDate::from_ymd_opt(2000, 2, 1).unwrap().and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_datetime("yesterday", DEFAULT_DATETIME_FORMAT).is_none());
        assert!(parse_datetime("2000/13/01", "%Y/%m/%d").is_none());
    }
}
