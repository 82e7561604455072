use crate::state::AppState;
use crate::terminal::TerminalSize;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::traits::{Drawable, HitRegion, HitTarget, RenderContext};

const KEY_HINTS: &str =
    "←↑↓→ move  Enter toggle  PgUp/PgDn month  t today  c clear  q quit";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    /// Rows are absolute frame lines.
    pub hits: Vec<HitRegion>,
    pub focus_row: Option<u16>,
}

impl RenderFrame {
    pub fn hit_test(&self, col: u16, row: usize) -> Option<HitTarget> {
        self.hits
            .iter()
            .find(|hit| hit.contains(col, row))
            .map(|hit| hit.target)
    }
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub show_hints: bool,
    pub theme: Theme,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            show_hints: true,
            theme: Theme::default_theme(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, state: &AppState, terminal_size: TerminalSize) -> RenderFrame {
        let theme = &self.config.theme;
        let mut frame = RenderFrame::default();
        let ctx = RenderContext {
            focused_id: state.focused_id().map(ToOwned::to_owned),
            terminal_size,
            theme: theme.clone(),
        };

        frame
            .lines
            .push(vec![Span::styled(state.title(), theme.title)]);
        let row_offset = frame.lines.len() as u16;

        let out = state.calendar().draw(&ctx);
        frame.hits.extend(out.hits.into_iter().map(|hit| HitRegion {
            row: hit.row.saturating_add(row_offset),
            ..hit
        }));
        frame.focus_row = out.focus_row.map(|row| row.saturating_add(row_offset));
        frame.lines.extend(out.lines);

        frame.lines.push(Vec::new());
        if let Some(status) = state.status() {
            frame
                .lines
                .push(vec![Span::styled(format!("  {status}"), theme.status)]);
        }
        if self.config.show_hints {
            frame
                .lines
                .push(vec![Span::styled(format!("  {KEY_HINTS}"), theme.hint)]);
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::{Renderer, RendererConfig};
    use crate::calendar::{CalendarDate, DisplayedMonth};
    use crate::state::AppState;
    use crate::terminal::TerminalSize;
    use crate::widgets::MultiDateCalendar;
    use crate::widgets::traits::HitTarget;

    const SIZE: TerminalSize = TerminalSize {
        width: 80,
        height: 24,
    };

    fn state() -> AppState {
        let today = CalendarDate::from_ymd(2024, 2, 10).expect("date");
        let month = DisplayedMonth::containing(today);
        AppState::new(MultiDateCalendar::new("dates", "Dates", today).with_month(month))
    }

    #[test]
    fn hits_are_shifted_below_title() {
        let frame = Renderer::default().render(&state(), SIZE);
        // title, label, nav row
        assert_eq!(frame.hit_test(2, 2), Some(HitTarget::PrevMonth));
        assert_eq!(frame.hit_test(0, 2), None);
        let first = CalendarDate::from_ymd(2024, 2, 1).expect("date");
        assert_eq!(frame.hit_test(24, 4), Some(HitTarget::Day(first)));
        assert_eq!(frame.hit_test(3, 4), None);
        assert_eq!(frame.focus_row, Some(5));
    }

    #[test]
    fn hints_can_be_hidden() {
        let with_hints = Renderer::default().render(&state(), SIZE);
        let without = Renderer::new(RendererConfig {
            show_hints: false,
            ..RendererConfig::default()
        })
        .render(&state(), SIZE);
        assert_eq!(with_hints.lines.len(), without.lines.len() + 1);
    }
}
