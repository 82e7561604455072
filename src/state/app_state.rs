use log::debug;

use crate::runtime::event::WidgetAction;
use crate::terminal::KeyEvent;
use crate::widgets::MultiDateCalendar;
use crate::widgets::traits::{Drawable, HitTarget, InteractionResult, Interactive};

const DEFAULT_TITLE: &str = "Select dates";

pub struct AppState {
    title: String,
    calendar: MultiDateCalendar,
    focused_id: Option<String>,
    status: Option<String>,
    should_exit: bool,
}

impl AppState {
    pub fn new(calendar: MultiDateCalendar) -> Self {
        let focused_id = Some(calendar.id().to_string());
        Self {
            title: DEFAULT_TITLE.to_string(),
            calendar,
            focused_id,
            status: None,
            should_exit: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn calendar(&self) -> &MultiDateCalendar {
        &self.calendar
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused_id.as_deref()
    }

    /// Message describing the most recent change, shown under the calendar.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        if self.focused_id.as_deref() != Some(self.calendar.id()) {
            return InteractionResult::ignored();
        }
        self.calendar.on_key(key)
    }

    pub fn navigate(&mut self, delta: i32) -> InteractionResult {
        self.calendar.navigate(delta)
    }

    pub fn activate(&mut self, target: HitTarget) -> InteractionResult {
        self.calendar.on_hit(target)
    }

    /// Returns whether the change needs a redraw.
    pub fn handle_widget_action(&mut self, action: WidgetAction) -> bool {
        let status = match action {
            WidgetAction::SelectionChanged { key, selected } => {
                debug!("{key} {}", if selected { "selected" } else { "deselected" });
                if selected {
                    format!("Selected {key}")
                } else {
                    format!("Deselected {key}")
                }
            }
            WidgetAction::SelectionCleared { count } => {
                debug!("selection cleared ({count} dates)");
                format!("Cleared {count} selected dates")
            }
            WidgetAction::MonthChanged { month } => {
                debug!("showing {month}");
                return false;
            }
        };
        self.status = Some(status);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::calendar::{CalendarDate, DisplayedMonth};
    use crate::runtime::event::WidgetAction;
    use crate::widgets::MultiDateCalendar;

    fn state() -> AppState {
        let today = CalendarDate::from_ymd(2024, 3, 15).expect("date");
        AppState::new(MultiDateCalendar::new("dates", "Dates", today))
    }

    #[test]
    fn calendar_starts_focused() {
        let state = state();
        assert_eq!(state.focused_id(), Some("dates"));
        assert!(!state.should_exit());
        assert_eq!(state.title(), "Select dates");
    }

    #[test]
    fn selection_actions_update_status() {
        let mut state = state();
        let key = CalendarDate::from_ymd(2024, 3, 1).expect("date").key();
        assert!(state.handle_widget_action(WidgetAction::SelectionChanged {
            key: key.clone(),
            selected: true,
        }));
        assert_eq!(state.status(), Some("Selected 01-03-2024"));

        state.handle_widget_action(WidgetAction::SelectionChanged {
            key,
            selected: false,
        });
        assert_eq!(state.status(), Some("Deselected 01-03-2024"));
    }

    #[test]
    fn month_changes_keep_status() {
        let mut state = state();
        state.handle_widget_action(WidgetAction::SelectionCleared { count: 2 });
        let month = DisplayedMonth::new(2024, 4).expect("month");
        assert!(!state.handle_widget_action(WidgetAction::MonthChanged { month }));
        assert_eq!(state.status(), Some("Cleared 2 selected dates"));
    }
}
