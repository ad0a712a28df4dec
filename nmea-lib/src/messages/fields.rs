//! Helpers for interpreting individual sentence fields.
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::{Error, Result, Sentence};

/// Two digit years before this are in the 2000s, the rest in the 1900s.
const CENTURY_PIVOT: i32 = 80;

fn invalid(idx: usize, value: &str) -> Error {
    Error::InvalidField {
        index: idx,
        value: value.to_string(),
    }
}

/// Parse a field that must be present and non-empty.
pub(crate) fn required<T: FromStr>(sentence: &Sentence, idx: usize) -> Result<T> {
    let value = sentence.field(idx).unwrap_or_default();
    value.parse().map_err(|_| invalid(idx, value))
}

/// Parse a field that may be empty or missing entirely.
pub(crate) fn optional<T: FromStr>(sentence: &Sentence, idx: usize) -> Result<Option<T>> {
    match sentence.field(idx) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| invalid(idx, value)),
    }
}

pub(crate) fn latitude(sentence: &Sentence, idx: usize) -> Result<f64> {
    coordinate(sentence, idx, ("N", "S"), 90.0)
}

pub(crate) fn longitude(sentence: &Sentence, idx: usize) -> Result<f64> {
    coordinate(sentence, idx, ("E", "W"), 180.0)
}

/// Decode a `[D]DDMM.MMMM` coordinate at `idx` and its hemisphere at `idx + 1` into
/// signed decimal degrees.
///
/// Whole degrees are all digits before the last 2 whole-minute digits, the remainder is
/// decimal minutes.
fn coordinate(
    sentence: &Sentence,
    idx: usize,
    (positive, negative): (&str, &str),
    max: f64,
) -> Result<f64> {
    let value = sentence.field(idx).unwrap_or_default();
    let whole = value.find('.').unwrap_or(value.len());
    if whole < 2 || !value.is_ascii() {
        return Err(invalid(idx, value));
    }
    let (degrees, minutes) = value.split_at(whole - 2);
    let degrees = if degrees.is_empty() {
        0.0
    } else {
        f64::from(degrees.parse::<u16>().map_err(|_| invalid(idx, value))?)
    };
    if !minutes.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(invalid(idx, value));
    }
    let minutes: f64 = minutes.parse().map_err(|_| invalid(idx, value))?;
    let decimal = degrees + minutes / 60.0;
    if minutes >= 60.0 || decimal > max {
        return Err(invalid(idx, value));
    }

    match sentence.field(idx + 1).unwrap_or_default() {
        h if h == positive => Ok(decimal),
        h if h == negative => Ok(-decimal),
        h => Err(invalid(idx + 1, h)),
    }
}

fn two_digits(value: &str, start: usize) -> Option<u32> {
    let digits = value.get(start..start + 2)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Decode `HHMMSS[.fff]`. Fractional seconds are validated but discarded.
pub(crate) fn time(sentence: &Sentence, idx: usize) -> Result<NaiveTime> {
    let value = sentence.field(idx).unwrap_or_default();
    if let Some(fraction) = value.get(6..) {
        let valid = fraction.is_empty()
            || (fraction.starts_with('.') && fraction[1..].bytes().all(|b| b.is_ascii_digit()));
        if !valid {
            return Err(invalid(idx, value));
        }
    }
    let (Some(hour), Some(min), Some(sec)) = (
        two_digits(value, 0),
        two_digits(value, 2),
        two_digits(value, 4),
    ) else {
        return Err(invalid(idx, value));
    };
    NaiveTime::from_hms_opt(hour, min, sec).ok_or_else(|| invalid(idx, value))
}

/// Decode `DDMMYY`. Years 80 through 99 are in the 1900s, all others in the 2000s.
pub(crate) fn date(sentence: &Sentence, idx: usize) -> Result<NaiveDate> {
    let value = sentence.field(idx).unwrap_or_default();
    if value.len() != 6 {
        return Err(invalid(idx, value));
    }
    let (Some(day), Some(month), Some(yy)) = (
        two_digits(value, 0),
        two_digits(value, 2),
        two_digits(value, 4),
    ) else {
        return Err(invalid(idx, value));
    };
    let yy = yy as i32;
    let year = if yy < CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(idx, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sentence(fields: &[&str]) -> Sentence {
        Sentence::new("GP", "TST", fields.iter().copied()).unwrap()
    }

    #[test_case("4807.038", "N", 48.1173; "north")]
    #[test_case("3751.65", "S", -37.860833; "south")]
    #[test_case("0030.0", "N", 0.5; "zero degrees")]
    #[test_case("30.0", "S", -0.5; "no degree digits")]
    fn latitudes(value: &str, hemisphere: &str, expected: f64) {
        let got = latitude(&sentence(&[value, hemisphere]), 0).unwrap();
        assert!((got - expected).abs() < 1e-6, "expected {expected}, got {got}");
    }

    #[test_case("01131.000", "E", 11.516_666_7; "east")]
    #[test_case("09147.4416929", "W", -91.790_694_9; "west")]
    #[test_case("12311.12", "W", -123.185_333_3; "three digit degrees")]
    fn longitudes(value: &str, hemisphere: &str, expected: f64) {
        let got = longitude(&sentence(&[value, hemisphere]), 0).unwrap();
        assert!((got - expected).abs() < 1e-6, "expected {expected}, got {got}");
    }

    #[test_case("", "N", 0; "empty")]
    #[test_case("4807.038", "E", 1; "wrong hemisphere")]
    #[test_case("4807.038", "", 1; "missing hemisphere")]
    #[test_case("4877.0", "N", 0; "minutes over 60")]
    #[test_case("9107.0", "N", 0; "over 90")]
    #[test_case("-4807.0", "N", 0; "negative")]
    #[test_case("48x7.0", "N", 0; "not a number")]
    fn invalid_latitudes(value: &str, hemisphere: &str, bad_idx: usize) {
        let zult = latitude(&sentence(&[value, hemisphere]), 0);
        match zult {
            Err(Error::InvalidField { index, .. }) => assert_eq!(index, bad_idx),
            _ => panic!("expected invalid field error, got {zult:?}"),
        }
    }

    #[test_case("123519", 12, 35, 19; "whole seconds")]
    #[test_case("225446.33", 22, 54, 46; "fractional seconds")]
    #[test_case("000000", 0, 0, 0; "midnight")]
    fn times(value: &str, hour: u32, min: u32, sec: u32) {
        let got = time(&sentence(&[value]), 0).unwrap();
        assert_eq!(got, NaiveTime::from_hms_opt(hour, min, sec).unwrap());
    }

    #[test_case(""; "empty")]
    #[test_case("1235"; "short")]
    #[test_case("243519"; "bad hour")]
    #[test_case("12351x"; "not digits")]
    #[test_case("123519x"; "trailing junk")]
    fn invalid_times(value: &str) {
        assert!(time(&sentence(&[value]), 0).is_err());
    }

    #[test_case("230394", 1994, 3, 23; "1900s")]
    #[test_case("191124", 2024, 11, 19; "2000s")]
    #[test_case("010180", 1980, 1, 1; "pivot")]
    #[test_case("311279", 2079, 12, 31; "before pivot")]
    fn dates(value: &str, year: i32, month: u32, day: u32) {
        let got = date(&sentence(&[value]), 0).unwrap();
        assert_eq!(got, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[test_case(""; "empty")]
    #[test_case("320394"; "bad day")]
    #[test_case("23039"; "short")]
    fn invalid_dates(value: &str) {
        assert!(date(&sentence(&[value]), 0).is_err());
    }

    #[test]
    fn optional_fields() {
        let s = sentence(&["", "12", "x"]);

        assert_eq!(optional::<u8>(&s, 0).unwrap(), None);
        assert_eq!(optional::<u8>(&s, 1).unwrap(), Some(12));
        assert!(matches!(
            optional::<u8>(&s, 2),
            Err(Error::InvalidField { index: 2, .. })
        ));
        assert_eq!(optional::<u8>(&s, 3).unwrap(), None);
    }

    #[test]
    fn required_fields() {
        let s = sentence(&["", "2.5"]);

        assert!(matches!(
            required::<f64>(&s, 0),
            Err(Error::InvalidField { index: 0, .. })
        ));
        assert_eq!(required::<f64>(&s, 1).unwrap(), 2.5);
        assert!(required::<f64>(&s, 2).is_err());
    }
}
