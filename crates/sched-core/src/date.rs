use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Storage and wire format of every task date: zero-padded `YYYYMMDD`.
pub const DATE_FORMAT: &str = "%Y%m%d";

const DATE_LEN: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date \"{0}\": expected 8 digits in YYYYMMDD format")]
pub struct DateParseError(pub String);

/// Strictly parses a `YYYYMMDD` date.
///
/// Exactly eight ASCII digits are accepted. chrono alone would take
/// `"2024011"` as January 1st, so the shape is checked before parsing.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    if s.len() != DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateParseError(s.to_string()))
}

/// Formats a date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Source of the reference day used when validating or completing tasks.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock calendar day in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("20240115").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("2024011")]
    #[case("202401150")]
    #[case("2024-01-15")]
    #[case("20241301")]
    #[case("20230229")]
    #[case(" 20240115")]
    #[case("+2024011")]
    fn test_parse_date_rejects(#[case] input: &str) {
        let err = parse_date(input).unwrap_err();
        assert_eq!(err, DateParseError(input.to_string()));
    }

    #[test]
    fn test_parse_date_leap_day() {
        assert!(parse_date("20240229").is_ok());
    }

    #[test]
    fn test_format_date_pads() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
        assert_eq!(format_date(date), "09870304");
    }

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }

    proptest! {
        #[test]
        fn parse_then_format_is_identity(days in 0i64..3_000_000) {
            let date = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap() + chrono::Duration::days(days);
            prop_assume!(date.format("%Y").to_string().len() == 4);
            let text = format_date(date);
            prop_assert_eq!(format_date(parse_date(&text).unwrap()), text);
        }
    }
}
