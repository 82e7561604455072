pub mod calendar;
pub mod config;
pub mod error;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use error::{Error, Result};
