use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::Error;

/// Weekdays in grid column order, column 0 is Sunday.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const DAYS_FROM_EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - DAYS_FROM_EPOCH_SHIFT
}

fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + DAYS_FROM_EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z.rem_euclid(DAYS_PER_ERA);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// Column index (0 = Sunday) of the given day.
pub(crate) fn weekday_index(year: i32, month: u8, day: u8) -> usize {
    // 1970-01-01 was a Thursday.
    (days_from_civil(year as i64, month, day) + 4).rem_euclid(7) as usize
}

/// A single calendar day. Only constructible for days that exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Caller guarantees `month` and `day` are in range.
    pub(crate) fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        debug_assert!(Self::from_ymd(year, month, day).is_some());
        Self { year, month, day }
    }

    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn key(self) -> DateKey {
        DateKey {
            text: format!("{:02}-{:02}-{:04}", self.day, self.month, self.year),
            date: self,
        }
    }

    pub fn weekday(self) -> Weekday {
        WEEKDAYS[weekday_index(self.year, self.month, self.day)]
    }

    /// Shift by whole days. Saturates at the ends of the `i32` year range.
    pub fn add_days(self, delta: i32) -> Self {
        let days = days_from_civil(self.year as i64, self.month, self.day) + delta as i64;
        let (year, month, day) = civil_from_days(days);
        match i32::try_from(year) {
            Ok(year) => Self::new_unchecked(year, month, day),
            Err(_) if year < 0 => Self::new_unchecked(i32::MIN, 1, 1),
            Err(_) => Self::new_unchecked(i32::MAX, 12, 31),
        }
    }

    pub fn parse_key(text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidDateKey(text.to_string());
        let mut parts = text.splitn(3, '-');
        let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if day.len() != 2 || month.len() != 2 {
            return Err(invalid());
        }
        let day = day.parse::<u8>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let date = Self::from_ymd(year, month, day).ok_or_else(invalid)?;
        if date.key().as_str() != text {
            return Err(invalid());
        }
        Ok(date)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new_unchecked(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Canonical `DD-MM-YYYY` identifier of a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    text: String,
    date: CalendarDate,
}

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }
}

impl From<CalendarDate> for DateKey {
    fn from(date: CalendarDate) -> Self {
        date.key()
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarDate::parse_key(s).map(CalendarDate::key)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, DateKey, days_in_month, is_leap_year};
    use chrono::{NaiveDate, Weekday};

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).expect("valid date")
    }

    #[test]
    fn key_is_zero_padded_day_month_year() {
        assert_eq!(date(2024, 3, 5).key().as_str(), "05-03-2024");
        assert_eq!(date(2024, 12, 31).key().as_str(), "31-12-2024");
        assert_eq!(date(987, 1, 1).key().as_str(), "01-01-0987");
        assert_eq!(date(-44, 3, 15).key().as_str(), "15-03--044");
    }

    #[test]
    fn from_ymd_rejects_days_that_do_not_exist() {
        assert!(CalendarDate::from_ymd(2023, 2, 29).is_none());
        assert!(CalendarDate::from_ymd(2024, 2, 29).is_some());
        assert!(CalendarDate::from_ymd(2024, 13, 1).is_none());
        assert!(CalendarDate::from_ymd(2024, 4, 31).is_none());
        assert!(CalendarDate::from_ymd(2024, 4, 0).is_none());
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn weekday_matches_chrono() {
        for (y, m, d) in [(2024, 2, 1), (1970, 1, 1), (2000, 2, 29), (1600, 3, 1), (-44, 3, 15)] {
            let ours = date(y, m, d).weekday();
            let theirs = chrono::Datelike::weekday(
                &NaiveDate::from_ymd_opt(y, m as u32, d as u32).expect("chrono date"),
            );
            assert_eq!(ours, theirs, "{y}-{m}-{d}");
        }
        assert_eq!(date(2024, 2, 1).weekday(), Weekday::Thu);
    }

    #[test]
    fn add_days_crosses_month_and_year_edges() {
        assert_eq!(date(2024, 1, 31).add_days(1), date(2024, 2, 1));
        assert_eq!(date(2024, 3, 1).add_days(-1), date(2024, 2, 29));
        assert_eq!(date(2023, 12, 28).add_days(7), date(2024, 1, 4));
        assert_eq!(date(2024, 1, 3).add_days(-7), date(2023, 12, 27));
    }

    #[test]
    fn parse_key_accepts_only_canonical_keys() {
        assert_eq!(
            CalendarDate::parse_key("15-03-2024").expect("canonical key"),
            date(2024, 3, 15)
        );
        for bad in ["5-03-2024", "15-3-2024", "15-03-24", "31-02-2024", "2024-03-15", "", "aa-bb-cccc"] {
            assert!(CalendarDate::parse_key(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn date_key_round_trips_to_date() {
        let key: DateKey = "29-02-2024".parse().expect("key");
        assert_eq!(key.date(), date(2024, 2, 29));
        assert_eq!(key.to_string(), "29-02-2024");

        let ancient = date(-44, 3, 15).key();
        assert_eq!(CalendarDate::parse_key(ancient.as_str()).expect("negative year"), date(-44, 3, 15));
    }

    #[test]
    fn converts_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2024, 7, 4).expect("chrono date");
        assert_eq!(CalendarDate::from(naive), date(2024, 7, 4));
    }
}
