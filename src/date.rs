//! Calendar helpers for the explorer sections.
//!
//! Every NASA endpoint speaks ISO `YYYY-MM-DD` strings; the UI speaks
//! "January 5, 2024" and "3 days ago". This module converts between the two
//! and computes the day offsets the date pickers need.

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

/// ISO `YYYY-MM-DD` rendering, the form every query parameter takes.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an ISO `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

/// Today's date in UTC, matching what the remote services consider "today".
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The date `days` before today. Negative values go forward.
pub fn days_ago(days: i64) -> NaiveDate {
    today() - chrono::Duration::days(days)
}

/// Long display form, e.g. `January 5, 2024`. Falls back to the raw string
/// when it is not a date at all.
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Ok(d) => format!(
            "{} {}, {}",
            MONTHS[d.month0() as usize],
            d.day(),
            d.year()
        ),
        Err(_) => s.to_owned(),
    }
}

/// Relative label for a date string: `Yesterday`, `3 days ago`, `In 2 weeks`,
/// `1 month ago`. Unparsable input comes back unchanged.
pub fn relative_time(s: &str) -> String {
    let Ok(date) = parse_date(s) else {
        return s.to_owned();
    };
    let delta = (today() - date).num_days();
    let past = delta >= 0;
    let days = delta.abs();

    let phrase = |n: i64, unit: &str| {
        let plural = if n > 1 { "s" } else { "" };
        if past {
            format!("{n} {unit}{plural} ago")
        } else {
            format!("In {n} {unit}{plural}")
        }
    };

    match days {
        0 => "Today".to_owned(),
        1 => {
            if past {
                "Yesterday".to_owned()
            } else {
                "Tomorrow".to_owned()
            }
        }
        2..=6 => phrase(days, "day"),
        7..=29 => phrase(days / 7, "week"),
        _ => phrase(days / 30, "month"),
    }
}

/// Whether the date string names today.
pub fn is_today(s: &str) -> bool {
    parse_date(s).is_ok_and(|d| d == today())
}

/// A uniformly random past date within `max_days_back` days of today.
/// Drives the APOD "Random Date" control.
pub fn random_date_within_days(max_days_back: u32) -> NaiveDate {
    let back = rand::thread_rng().gen_range(0..i64::from(max_days_back.max(1)));
    days_ago(back)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_round_trip() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(d), "2024-01-05");
        assert_eq!(parse_date("2024-01-05").unwrap(), d);
    }

    #[test]
    fn offsets_go_both_ways() {
        assert_eq!(days_ago(0), today());
        assert_eq!(days_ago(7), today() - chrono::Duration::days(7));
        assert_eq!(days_ago(-7), today() + chrono::Duration::days(7));
    }

    #[test]
    fn display_form() {
        assert_eq!(display_date("2024-01-05"), "January 5, 2024");
        assert_eq!(display_date("2023-12-31"), "December 31, 2023");
        assert_eq!(display_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn relative_labels() {
        assert_eq!(relative_time(&format_date(today())), "Today");
        assert_eq!(relative_time(&format_date(days_ago(1))), "Yesterday");
        assert_eq!(relative_time(&format_date(days_ago(-1))), "Tomorrow");
        assert_eq!(relative_time(&format_date(days_ago(3))), "3 days ago");
        assert_eq!(relative_time(&format_date(days_ago(-3))), "In 3 days");
        assert_eq!(relative_time(&format_date(days_ago(14))), "2 weeks ago");
        assert_eq!(relative_time(&format_date(days_ago(90))), "3 months ago");
    }

    #[test]
    fn today_check() {
        assert!(is_today(&format_date(today())));
        assert!(!is_today("1999-12-31"));
        assert!(!is_today("garbage"));
    }

    #[test]
    fn random_date_is_in_range() {
        for _ in 0..50 {
            let d = random_date_within_days(3650);
            assert!(d <= today());
            assert!(d > today() - chrono::Duration::days(3650));
        }
    }
}
