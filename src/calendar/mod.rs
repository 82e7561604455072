pub mod date;
pub mod grid;
pub mod month;
pub mod selection;

pub use date::{CalendarDate, DateKey, WEEKDAYS};
pub use grid::{Cell, DAYS_PER_WEEK, Grid, Week};
pub use month::DisplayedMonth;
pub use selection::SelectionStore;
