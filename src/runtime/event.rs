use crate::calendar::{DateKey, DisplayedMonth};

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    SelectionChanged { key: DateKey, selected: bool },
    SelectionCleared { count: usize },
    MonthChanged { month: DisplayedMonth },
}
