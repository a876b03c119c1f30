//! Calendar date helpers for DTO and storage encoding.
//!
//! # Responsibility
//! - Parse and format ISO-8601 `YYYY-MM-DD` date strings used at the DTO
//!   boundary.
//! - Convert between civil dates, epoch days and unix seconds for storage
//!   encoding (`books.published` persists as unix seconds).
//!
//! # Invariants
//! - Only real calendar dates parse (leap years included).
//! - Conversions are exact inverses of each other over the supported range.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{SystemTime, UNIX_EPOCH};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

const SECONDS_PER_DAY: i64 = 86_400;

/// Proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CivilDate {
    /// Parses a strict `YYYY-MM-DD` string into a validated calendar date.
    ///
    /// Returns `None` for malformed strings and for dates that do not exist
    /// on the calendar (e.g. `2023-02-29`).
    pub fn parse_iso(value: &str) -> Option<Self> {
        let captures = ISO_DATE_RE.captures(value.trim())?;
        let year: i32 = captures[1].parse().ok()?;
        let month: u8 = captures[2].parse().ok()?;
        let day: u8 = captures[3].parse().ok()?;

        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }

        Some(Self { year, month, day })
    }

    /// Formats as `YYYY-MM-DD`.
    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Days since 1970-01-01, negative for earlier dates.
    pub fn to_epoch_days(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Unix timestamp of midnight UTC on this date.
    pub fn to_unix_seconds(self) -> i64 {
        self.to_epoch_days() * SECONDS_PER_DAY
    }

    /// Date of the UTC day containing the given unix timestamp.
    pub fn from_unix_seconds(seconds: i64) -> Self {
        civil_from_days(seconds.div_euclid(SECONDS_PER_DAY))
    }

    /// Current UTC date from the system clock.
    pub fn today() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or(0);
        Self::from_unix_seconds(seconds)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

// Days-from-civil and its inverse use the standard era/year-of-era
// decomposition over 400-year cycles, with March as the first month so the
// leap day lands at the end of the cycle year.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let year = i64::from(year) - i64::from(month <= 2);
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    let month_of_cycle = i64::from((month + 9) % 12);
    let day_of_year = (153 * month_of_cycle + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(epoch_days: i64) -> CivilDate {
    let shifted = epoch_days + 719_468;
    let era = if shifted >= 0 { shifted } else { shifted - 146_096 } / 146_097;
    let day_of_era = shifted - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let year = year_of_era + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_of_cycle = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_of_cycle + 2) / 5 + 1) as u8;
    let month = if month_of_cycle < 10 {
        (month_of_cycle + 3) as u8
    } else {
        (month_of_cycle - 9) as u8
    };
    let year = if month <= 2 { year + 1 } else { year };

    CivilDate {
        year: year as i32,
        month,
        day,
    }
}

#[cfg(test)]
mod tests {
    use super::CivilDate;

    #[test]
    fn parses_valid_iso_date() {
        let date = CivilDate::parse_iso("2014-11-18").unwrap();
        assert_eq!(date.year, 2014);
        assert_eq!(date.month, 11);
        assert_eq!(date.day, 18);
    }

    #[test]
    fn rejects_malformed_and_impossible_dates() {
        assert!(CivilDate::parse_iso("2014/11/18").is_none());
        assert!(CivilDate::parse_iso("2014-13-01").is_none());
        assert!(CivilDate::parse_iso("2023-02-29").is_none());
        assert!(CivilDate::parse_iso("2023-04-31").is_none());
        assert!(CivilDate::parse_iso("not a date").is_none());
    }

    #[test]
    fn leap_day_parses_on_leap_years() {
        assert!(CivilDate::parse_iso("2024-02-29").is_some());
        assert!(CivilDate::parse_iso("2000-02-29").is_some());
        assert!(CivilDate::parse_iso("1900-02-29").is_none());
    }

    #[test]
    fn epoch_conversions_round_trip() {
        for iso in ["1970-01-01", "1987-06-24", "2014-11-18", "2024-02-29"] {
            let date = CivilDate::parse_iso(iso).unwrap();
            assert_eq!(CivilDate::from_unix_seconds(date.to_unix_seconds()), date);
            assert_eq!(date.to_iso(), iso);
        }
    }

    #[test]
    fn known_epoch_days() {
        assert_eq!(CivilDate::parse_iso("1970-01-01").unwrap().to_epoch_days(), 0);
        assert_eq!(CivilDate::parse_iso("1970-01-02").unwrap().to_epoch_days(), 1);
        assert_eq!(CivilDate::parse_iso("1969-12-31").unwrap().to_epoch_days(), -1);
        assert_eq!(
            CivilDate::parse_iso("2000-03-01").unwrap().to_epoch_days(),
            11_017
        );
    }

    #[test]
    fn ordering_follows_calendar_order() {
        let earlier = CivilDate::parse_iso("1986-06-24").unwrap();
        let later = CivilDate::parse_iso("1987-06-24").unwrap();
        assert!(earlier < later);
    }
}
