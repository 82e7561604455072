use std::fmt;
use std::str::FromStr;

use chrono::Month;

use crate::calendar::date::{self, CalendarDate};
use crate::error::Error;

/// The single (year, month) pair a calendar view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    year: i32,
    month: u8,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    /// Move by `delta` months, rolling the year over in either direction.
    pub fn advance(self, delta: i32) -> Self {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        match i32::try_from(year) {
            Ok(year) => Self { year, month },
            Err(_) if year < 0 => Self { year: i32::MIN, month: 1 },
            Err(_) => Self { year: i32::MAX, month: 12 },
        }
    }

    pub fn days_in_month(self) -> u8 {
        date::days_in_month(self.year, self.month)
    }

    /// Column index (0 = Sunday) of day 1.
    pub fn starting_weekday(self) -> usize {
        date::weekday_index(self.year, self.month, 1)
    }

    pub fn first_day(self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, 1)
    }

    pub fn last_day(self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, self.days_in_month())
    }

    /// The day in this month closest to `day` of any month.
    pub fn clamp_day(self, day: u8) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, day.clamp(1, self.days_in_month()))
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn name(self) -> &'static str {
        Month::try_from(self.month)
            .map(|month| month.name())
            .unwrap_or("")
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Parses `YYYY-MM`.
impl FromStr for DisplayedMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}
