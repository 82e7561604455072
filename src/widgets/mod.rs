pub mod base;
pub mod calendar;
pub mod traits;

pub use calendar::MultiDateCalendar;
