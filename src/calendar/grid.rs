use crate::calendar::date::CalendarDate;
use crate::calendar::month::DisplayedMonth;

pub const DAYS_PER_WEEK: usize = 7;

/// One grid position: padding before/after the month, or a day in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Day(CalendarDate),
}

impl Cell {
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            Cell::Empty => None,
            Cell::Day(date) => Some(date),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Sunday..Saturday.
pub type Week = [Cell; DAYS_PER_WEEK];

/// Week-by-week layout of one month. Holds 4 to 6 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    month: DisplayedMonth,
    weeks: Vec<Week>,
}

impl Grid {
    pub fn build(month: DisplayedMonth) -> Self {
        let mut weeks = Vec::with_capacity(6);
        let mut week: Week = [Cell::Empty; DAYS_PER_WEEK];
        let mut col = month.starting_weekday();

        for day in 1..=month.days_in_month() {
            week[col] = Cell::Day(CalendarDate::new_unchecked(month.year(), month.month(), day));
            col += 1;
            if col == DAYS_PER_WEEK {
                weeks.push(week);
                week = [Cell::Empty; DAYS_PER_WEEK];
                col = 0;
            }
        }

        if col > 0 {
            weeks.push(week);
        }

        Self { month, weeks }
    }

    pub fn month(&self) -> DisplayedMonth {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn row_count(&self) -> usize {
        self.weeks.len()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().copied())
    }

    /// `(row, col)` of `date`, if it is in this month.
    pub fn position_of(&self, date: CalendarDate) -> Option<(usize, usize)> {
        if !self.month.contains(date) {
            return None;
        }
        let offset = self.month.starting_weekday() + date.day() as usize - 1;
        Some((offset / DAYS_PER_WEEK, offset % DAYS_PER_WEEK))
    }
}
