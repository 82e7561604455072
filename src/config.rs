use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calendar::{CalendarDate, DateKey, DisplayedMonth, SelectionStore};
use crate::error::{Error, Result};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the YAML config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Initial month as `YYYY-MM`.
    pub month: Option<String>,
    /// Preselected date keys as `DD-MM-YYYY`.
    pub selected: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_yaml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub month: Option<String>,
    pub select: Vec<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully validated startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub month: DisplayedMonth,
    pub selection: SelectionStore,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(config: Config, overrides: Overrides, today: CalendarDate) -> Result<Self> {
        let month = match overrides.month.or(config.month) {
            Some(text) => text.parse::<DisplayedMonth>()?,
            None => DisplayedMonth::containing(today),
        };

        // Config entries first, then command line entries, duplicates collapse.
        let selection = config
            .selected
            .iter()
            .chain(overrides.select.iter())
            .map(|text| text.parse::<DateKey>())
            .collect::<Result<SelectionStore>>()?;

        Ok(Self {
            month,
            selection,
            log_file: overrides.log_file.or(config.log_file),
            log_level: config
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Config, Overrides, Settings};
    use crate::calendar::{CalendarDate, DisplayedMonth};
    use crate::error::Error;

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2024, 6, 15).expect("date")
    }

    #[test]
    fn empty_config_defaults_to_todays_month() {
        let settings =
            Settings::resolve(Config::default(), Overrides::default(), today()).expect("settings");
        assert_eq!(settings.month, DisplayedMonth::new(2024, 6).expect("month"));
        assert!(settings.selection.is_empty());
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn parses_yaml_fields() {
        let config = Config::from_yaml(
            "month: 2024-02\nselected:\n  - 01-02-2024\n  - 29-02-2024\nlog_file: cal.log\nlog_level: debug\n",
        )
        .expect("config");
        assert_eq!(config.month.as_deref(), Some("2024-02"));
        assert_eq!(config.selected.len(), 2);
        assert_eq!(config.log_file, Some(PathBuf::from("cal.log")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_yaml("colour: red\n").is_err());
    }

    #[test]
    fn command_line_wins_and_selection_appends() {
        let config = Config {
            month: Some("2024-02".to_string()),
            selected: vec!["01-02-2024".to_string()],
            log_file: Some(PathBuf::from("a.log")),
            log_level: None,
        };
        let overrides = Overrides {
            month: Some("2025-01".to_string()),
            select: vec!["10-01-2025".to_string(), "01-02-2024".to_string()],
            log_file: Some(PathBuf::from("b.log")),
        };
        let settings = Settings::resolve(config, overrides, today()).expect("settings");

        assert_eq!(settings.month, DisplayedMonth::new(2025, 1).expect("month"));
        assert_eq!(settings.selection.display(), "[01-02-2024, 10-01-2025]");
        assert_eq!(settings.log_file, Some(PathBuf::from("b.log")));
    }

    #[test]
    fn invalid_entries_are_errors() {
        let bad_month = Overrides {
            month: Some("2024-13".to_string()),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(Config::default(), bad_month, today()),
            Err(Error::InvalidMonth(_))
        ));

        let bad_key = Overrides {
            select: vec!["2024-01-01".to_string()],
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(Config::default(), bad_key, today()),
            Err(Error::InvalidDateKey(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/multical-config.yaml");
        assert!(matches!(Config::load(&path), Err(Error::Io(_))));
    }
}
