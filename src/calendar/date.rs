//! `DD/MM/YYYY` date handling and session kind classification

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::SessionKind;

/// Length of a fully typed `DD/MM/YYYY` date
pub const FULL_DATE_LEN: usize = 10;

/// Parse a `DD/MM/YYYY` string into a calendar date.
///
/// Returns `None` unless the input splits into exactly three numeric parts,
/// the last one a four-digit year, that name a real calendar day.
/// Out-of-range days are rejected rather than rolled over, so `31/02/2026`
/// and `29/02/2025` both fail.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if year.len() != 4 {
        return None;
    }

    let day: u32 = parse_numeric(day)?;
    let month: u32 = parse_numeric(month)?;
    let year: i32 = parse_numeric(year)?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    // from_ymd_opt already refuses overflow, keep the read-back as the contract
    if date.day() != day || date.month() != month || date.year() != year {
        return None;
    }
    Some(date)
}

fn parse_numeric<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Format a date as `DD/MM/YYYY`, zero-padding every part
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Saturday and Sunday map to their own kinds, any other weekday is a holiday slot
pub fn classify_day_kind(date: NaiveDate) -> SessionKind {
    match date.weekday() {
        Weekday::Sat => SessionKind::Saturday,
        Weekday::Sun => SessionKind::Sunday,
        _ => SessionKind::Holiday,
    }
}

/// Kind to pre-select while the user types a session date.
///
/// Only a complete, valid date on a weekend replaces `current`; weekdays keep
/// whatever is selected so a manual choice is never forced back.
pub fn suggest_kind(input: &str, current: SessionKind) -> SessionKind {
    if input.len() != FULL_DATE_LEN {
        return current;
    }
    match parse_date(input).map(classify_day_kind) {
        Some(kind @ (SessionKind::Saturday | SessionKind::Sunday)) => kind,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_dates() {
        assert_eq!(parse_date("10/01/2026"), Some(ymd(2026, 1, 10)));
        assert_eq!(parse_date("29/02/2024"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date("1/2/2026"), Some(ymd(2026, 2, 1)));
    }

    #[test]
    fn test_parse_rejects_non_calendar_dates() {
        assert_eq!(parse_date("31/02/2026"), None);
        assert_eq!(parse_date("29/02/2025"), None);
        assert_eq!(parse_date("31/04/2026"), None);
        assert_eq!(parse_date("00/01/2026"), None);
        assert_eq!(parse_date("10/13/2026"), None);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_date("10-01-2026"), None);
        assert_eq!(parse_date("abc"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("10/01"), None);
        assert_eq!(parse_date("10/01/2026/1"), None);
        assert_eq!(parse_date("10/01/26"), None);
        assert_eq!(parse_date("10/01/02026"), None);
        assert_eq!(parse_date("1a/01/2026"), None);
        assert_eq!(parse_date("10//2026"), None);
        assert_eq!(parse_date(" 10/01/2026"), None);
    }

    #[test]
    fn test_format_pads_day_and_month() {
        assert_eq!(format_date(ymd(2026, 1, 3)), "03/01/2026");
        assert_eq!(format_date(ymd(2026, 12, 25)), "25/12/2026");
        assert_eq!(format_date(ymd(999, 7, 4)), "04/07/0999");
    }

    #[test]
    fn test_round_trip_over_two_years() {
        let mut date = ymd(2024, 1, 1);
        let end = ymd(2025, 12, 31);
        while date <= end {
            assert_eq!(parse_date(&format_date(date)), Some(date));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_classify_day_kind() {
        assert_eq!(classify_day_kind(ymd(2026, 1, 10)), SessionKind::Saturday);
        assert_eq!(classify_day_kind(ymd(2026, 1, 11)), SessionKind::Sunday);
        assert_eq!(classify_day_kind(ymd(2026, 1, 12)), SessionKind::Holiday);
        assert_eq!(classify_day_kind(ymd(2025, 12, 25)), SessionKind::Holiday);
    }

    #[test]
    fn test_suggest_kind() {
        // incomplete input keeps the selection
        assert_eq!(suggest_kind("10/01/20", SessionKind::Holiday), SessionKind::Holiday);
        // weekend overrides
        assert_eq!(suggest_kind("11/01/2026", SessionKind::Saturday), SessionKind::Sunday);
        assert_eq!(suggest_kind("10/01/2026", SessionKind::Holiday), SessionKind::Saturday);
        // weekday never forces Holiday
        assert_eq!(suggest_kind("12/01/2026", SessionKind::Sunday), SessionKind::Sunday);
        // invalid complete date keeps the selection
        assert_eq!(suggest_kind("31/02/2026", SessionKind::Sunday), SessionKind::Sunday);
    }
}
