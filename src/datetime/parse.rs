use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static DATE_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})").expect("date segment pattern is valid")
});

static TIME_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2})\s?((?i:AM|PM))?").expect("time segment pattern is valid")
});

/// Parse a stored user date (`D/M/YYYY` or `D-M-YYYY`, optional `H:MM`
/// with optional meridiem) into a local wall-clock instant.
///
/// Two-digit years are taken as 20xx. A missing time segment means
/// midnight. Returns `None` when there is no date segment or the fields
/// name no real calendar date; the caller treats that as "no reminder".
pub fn parse_user_date(s: &str) -> Option<NaiveDateTime> {
    let caps = DATE_SEGMENT_RE.captures(s)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    let (hour, minute) = match TIME_SEGMENT_RE.captures(s) {
        Some(time) => {
            let raw_hour: u32 = time[1].parse().ok()?;
            let minute: u32 = time[2].parse().ok()?;
            let meridiem = time.get(3).map(|m| m.as_str().to_ascii_uppercase());
            let hour = match meridiem.as_deref() {
                Some("PM") => {
                    if raw_hour == 12 { 12 } else { raw_hour + 12 }
                }
                // AM: midnight is written as 12
                Some(_) => {
                    if raw_hour == 12 { 0 } else { raw_hour }
                }
                None => raw_hour,
            };
            (hour, minute)
        }
        None => (0, 0),
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::extract_date_time;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_date_time_pm() {
        let dt = parse_user_date("25/12/2025 6:30 PM").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2025, 12, 25)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_short_year_and_dashes() {
        let dt = parse_user_date("31-01-26 11:59 PM").unwrap();
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.year(), 2026);
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.minute(), 59);
    }

    #[test]
    fn test_parse_date_only_defaults_to_midnight() {
        let dt = parse_user_date("1/2/2025").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_parse_twelve_am_is_midnight() {
        let dt = parse_user_date("5/5/2025 12:00 AM").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_twelve_pm_is_noon() {
        let dt = parse_user_date("5/5/2025 12:00 PM").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_am_unchanged() {
        let dt = parse_user_date("5/5/2025 9:15 AM").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 15);
    }

    #[test]
    fn test_parse_24h_time_without_meridiem() {
        let dt = parse_user_date("5/5/2025 18:45").unwrap();
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_no_date_segment() {
        assert_eq!(parse_user_date("tomorrow maybe"), None);
        assert_eq!(parse_user_date(""), None);
    }

    #[test]
    fn test_parse_impossible_date() {
        assert_eq!(parse_user_date("31/2/2025"), None);
        assert_eq!(parse_user_date("1/13/2025"), None);
    }

    #[test]
    fn test_parse_impossible_time() {
        assert_eq!(parse_user_date("1/2/2025 25:00"), None);
    }

    #[test]
    fn test_extraction_round_trips_through_parser() {
        for input in [
            "Buy milk 25/12/2025 6:30 PM",
            "x 1-2-25",
            "y 09/10/2025 10:00 am",
            "z 31-01-26 11:59 PM",
        ] {
            let extracted = extract_date_time(input).unwrap();
            assert!(
                parse_user_date(extracted).is_some(),
                "extracted {extracted:?} must parse"
            );
        }
    }
}
