use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub hint: Style,
    pub status: Style,
    pub header: Style,
    pub nav: Style,
    pub selected: Style,
    pub cursor: Style,
    pub selected_cursor: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            hint: Style::new().color(Color::DarkGrey),
            status: Style::new().color(Color::Yellow),
            header: Style::new().color(Color::DarkGrey),
            nav: Style::new().color(Color::Cyan),
            selected: Style::new().color(Color::Black).background(Color::Cyan).bold(),
            cursor: Style::new().color(Color::Yellow).bold(),
            selected_cursor: Style::new()
                .color(Color::Black)
                .background(Color::Yellow)
                .bold(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
