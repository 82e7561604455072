use crate::calendar::{
    CalendarDate, Cell, DAYS_PER_WEEK, DateKey, DisplayedMonth, Grid, SelectionStore, WEEKDAYS,
};
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{LineBuilder, Span};
use crate::ui::theme::Theme;
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, HitRegion, HitTarget, InteractionResult, Interactive, RenderContext,
};

const INDENT: &str = "  ";
const CELL_WIDTH: usize = 5;
const GRID_WIDTH: usize = CELL_WIDTH * DAYS_PER_WEEK;
const PREV_LABEL: &str = "‹ Prev";
const NEXT_LABEL: &str = "Next ›";

// ── MultiDateCalendar ────────────────────────────────────────────────────────

/// Month view that toggles any number of days in and out of a selection.
pub struct MultiDateCalendar {
    base: WidgetBase,
    today: CalendarDate,
    month: DisplayedMonth,
    grid: Grid,
    selection: SelectionStore,
    /// Keyboard cursor, always inside `month`.
    cursor: CalendarDate,
}

impl MultiDateCalendar {
    pub fn new(id: impl Into<String>, label: impl Into<String>, today: CalendarDate) -> Self {
        let month = DisplayedMonth::containing(today);
        Self {
            base: WidgetBase::new(id, label),
            today,
            month,
            grid: Grid::build(month),
            selection: SelectionStore::new(),
            cursor: today,
        }
    }

    pub fn with_month(mut self, month: DisplayedMonth) -> Self {
        self.show_month(month);
        self
    }

    pub fn with_selection(mut self, selection: SelectionStore) -> Self {
        self.selection = selection;
        self
    }

    pub fn month(&self) -> DisplayedMonth {
        self.month
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn navigate(&mut self, delta: i32) -> InteractionResult {
        self.show_month(self.month.advance(delta));
        InteractionResult::with_action(WidgetAction::MonthChanged { month: self.month })
    }

    pub fn toggle(&mut self, date: CalendarDate) -> InteractionResult {
        let key = date.key();
        self.selection = self.selection.toggle(&key);
        let selected = self.selection.is_selected(&key);
        InteractionResult::with_action(WidgetAction::SelectionChanged { key, selected })
    }

    pub fn clear(&mut self) -> InteractionResult {
        if self.selection.is_empty() {
            return InteractionResult::ignored();
        }
        let count = self.selection.len();
        self.selection = self.selection.cleared();
        InteractionResult::with_action(WidgetAction::SelectionCleared { count })
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn show_month(&mut self, month: DisplayedMonth) {
        if month != self.month {
            self.month = month;
            self.grid = Grid::build(month);
        }
        if !month.contains(self.cursor) {
            self.cursor = month.clamp_day(self.cursor.day());
        }
    }

    /// Moves the cursor; the view follows it across month edges.
    fn move_cursor(&mut self, days: i32) -> InteractionResult {
        self.place_cursor(self.cursor.add_days(days))
    }

    fn place_cursor(&mut self, date: CalendarDate) -> InteractionResult {
        self.cursor = date;
        if self.month.contains(date) {
            return InteractionResult::handled();
        }
        self.show_month(DisplayedMonth::containing(date));
        InteractionResult::with_action(WidgetAction::MonthChanged { month: self.month })
    }

    fn day_span(&self, date: CalendarDate, focused: bool, theme: &Theme) -> Span {
        let selected = self.selection.is_selected(&date.key());
        let is_cursor = focused && date == self.cursor;
        let text = if is_cursor {
            format!(" [{:>2}]", date.day())
        } else {
            format!("  {:>2} ", date.day())
        };
        match (selected, is_cursor) {
            (true, true) => Span::styled(text, theme.selected_cursor),
            (true, false) => Span::styled(text, theme.selected),
            (false, true) => Span::styled(text, theme.cursor),
            (false, false) => Span::new(text),
        }
    }
}

/// Greedily packs `[k1, k2, ...]` into lines no wider than `width`.
fn wrap_selection(keys: &[DateKey], width: usize) -> Vec<String> {
    let last = keys.len().saturating_sub(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for (i, key) in keys.iter().enumerate() {
        let mut piece = String::new();
        if i == 0 {
            piece.push('[');
        }
        piece.push_str(key.as_str());
        piece.push(if i == last { ']' } else { ',' });

        if !current.is_empty() && current.len() + 1 + piece.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&piece);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Drawable ──────────────────────────────────────────────────────────────────

impl Drawable for MultiDateCalendar {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let theme = &ctx.theme;
        let mut out = DrawOutput::default();

        out.lines
            .push(vec![Span::new(self.base.prefixed_label(focused))]);

        // ── Navigation row ────────────────────────────────────────────────────
        let row = out.next_row();
        let mut nav = LineBuilder::new();
        nav.push(Span::new(INDENT));
        let prev = nav.push(Span::styled(PREV_LABEL, theme.nav));
        let title_width = GRID_WIDTH - PREV_LABEL.chars().count() - NEXT_LABEL.chars().count();
        nav.push(Span::styled(
            format!("{:^title_width$}", self.month.to_string()),
            theme.title,
        ));
        let next = nav.push(Span::styled(NEXT_LABEL, theme.nav));
        out.hits.push(HitRegion {
            row,
            cols: prev,
            target: HitTarget::PrevMonth,
        });
        out.hits.push(HitRegion {
            row,
            cols: next,
            target: HitTarget::NextMonth,
        });
        out.lines.push(nav.finish());

        // ── Weekday header ────────────────────────────────────────────────────
        let header: String = WEEKDAYS.iter().map(|wd| format!(" {wd:^3} ")).collect();
        out.lines.push(vec![
            Span::new(INDENT),
            Span::styled(header, theme.header),
        ]);

        // ── Grid ──────────────────────────────────────────────────────────────
        for week in self.grid.weeks() {
            let row = out.next_row();
            let mut line = LineBuilder::new();
            line.push(Span::new(INDENT));
            for cell in week {
                match cell {
                    Cell::Empty => {
                        line.push(Span::new(" ".repeat(CELL_WIDTH)));
                    }
                    Cell::Day(date) => {
                        let cols = line.push(self.day_span(*date, focused, theme));
                        out.hits.push(HitRegion {
                            row,
                            cols,
                            target: HitTarget::Day(*date),
                        });
                        if *date == self.cursor {
                            out.focus_row = Some(row);
                        }
                    }
                }
            }
            out.lines.push(line.finish());
        }

        // ── Selected dates ────────────────────────────────────────────────────
        if !self.selection.is_empty() {
            out.lines.push(Vec::new());
            out.lines
                .push(vec![Span::new(format!("{INDENT}User Selected Dates -"))]);
            let width = (ctx.terminal_size.width as usize)
                .saturating_sub(INDENT.len() + 1)
                .max(1);
            for text in wrap_selection(&self.selection.render(), width) {
                out.lines.push(vec![Span::new(INDENT), Span::new(text)]);
            }
        }

        out
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

impl Interactive for MultiDateCalendar {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-(DAYS_PER_WEEK as i32)),
            KeyCode::Down => self.move_cursor(DAYS_PER_WEEK as i32),
            KeyCode::Home => self.place_cursor(self.month.first_day()),
            KeyCode::End => self.place_cursor(self.month.last_day()),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle(self.cursor),
            KeyCode::Char('t') => self.place_cursor(self.today),
            KeyCode::Char('c') => self.clear(),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_hit(&mut self, target: HitTarget) -> InteractionResult {
        match target {
            HitTarget::PrevMonth => self.navigate(-1),
            HitTarget::NextMonth => self.navigate(1),
            HitTarget::Day(date) => {
                let mut result = self.place_cursor(date);
                result.merge(self.toggle(date));
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MultiDateCalendar, wrap_selection};
    use crate::calendar::{CalendarDate, DateKey, DisplayedMonth};
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::ui::theme::Theme;
    use crate::widgets::traits::{Drawable, HitTarget, Interactive, RenderContext};

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).expect("valid date")
    }

    fn calendar() -> MultiDateCalendar {
        MultiDateCalendar::new("dates", "Dates", date(2024, 3, 15))
    }

    fn ctx() -> RenderContext {
        RenderContext {
            focused_id: Some("dates".to_string()),
            terminal_size: TerminalSize {
                width: 80,
                height: 24,
            },
            theme: Theme::default_theme(),
        }
    }

    fn text_of(line: &[crate::ui::span::Span]) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn arrow_keys_follow_cursor_into_next_month() {
        let mut cal = calendar();
        cal.on_key(KeyEvent::plain(KeyCode::End));
        assert_eq!(cal.cursor(), date(2024, 3, 31));

        let result = cal.on_key(KeyEvent::plain(KeyCode::Right));
        assert_eq!(cal.cursor(), date(2024, 4, 1));
        assert_eq!(cal.month(), DisplayedMonth::new(2024, 4).expect("month"));
        assert_eq!(
            result.actions,
            vec![WidgetAction::MonthChanged {
                month: cal.month()
            }]
        );
    }

    #[test]
    fn navigation_clamps_cursor_day() {
        let mut cal = calendar().with_month(DisplayedMonth::new(2024, 1).expect("month"));
        cal.on_key(KeyEvent::plain(KeyCode::End));
        assert_eq!(cal.cursor(), date(2024, 1, 31));
        cal.navigate(1);
        assert_eq!(cal.cursor(), date(2024, 2, 29));
    }

    #[test]
    fn enter_toggles_cursor_day() {
        let mut cal = calendar();
        let result = cal.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(cal.selection().display(), "[15-03-2024]");
        assert_eq!(
            result.actions,
            vec![WidgetAction::SelectionChanged {
                key: date(2024, 3, 15).key(),
                selected: true
            }]
        );

        cal.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert!(cal.selection().is_empty());
    }

    #[test]
    fn clicking_a_day_moves_cursor_and_toggles() {
        let mut cal = calendar();
        cal.on_hit(HitTarget::Day(date(2024, 3, 2)));
        assert_eq!(cal.cursor(), date(2024, 3, 2));
        assert!(cal.selection().is_selected(&date(2024, 3, 2).key()));
    }

    #[test]
    fn today_key_returns_to_current_month() {
        let mut cal = calendar();
        cal.navigate(-14);
        cal.on_key(KeyEvent::plain(KeyCode::Char('t')));
        assert_eq!(cal.cursor(), date(2024, 3, 15));
        assert_eq!(cal.month(), DisplayedMonth::containing(date(2024, 3, 15)));
    }

    #[test]
    fn clear_empties_selection_once() {
        let mut cal = calendar();
        cal.toggle(date(2024, 3, 1));
        cal.toggle(date(2024, 3, 2));
        let result = cal.on_key(KeyEvent::plain(KeyCode::Char('c')));
        assert_eq!(result.actions, vec![WidgetAction::SelectionCleared { count: 2 }]);
        assert!(!cal.clear().handled);
    }

    #[test]
    fn draw_lays_out_header_weeks_and_selection() {
        let mut cal = calendar().with_month(DisplayedMonth::new(2024, 2).expect("month"));
        cal.toggle(date(2024, 2, 26));
        let out = cal.draw(&ctx());
        let lines: Vec<String> = out.lines.iter().map(|l| text_of(l)).collect();

        assert_eq!(lines[0], "> Dates:");
        assert!(lines[1].contains("February 2024"));
        assert!(lines[1].starts_with("  ‹ Prev"));
        assert!(lines[1].ends_with("Next ›"));
        assert_eq!(lines[2], "   Sun  Mon  Tue  Wed  Thu  Fri  Sat ");
        assert_eq!(lines[3], format!("  {}{}", " ".repeat(20), "   1    2    3 "));
        assert_eq!(lines[7], format!("  {}{}", "  25   26   27   28   29 ", " ".repeat(10)));
        assert_eq!(lines[9], "  User Selected Dates -");
        assert_eq!(lines[10], "  [26-02-2024]");
        assert_eq!(lines.len(), 11);

        // 29 day cells plus the two navigation buttons.
        assert_eq!(out.hits.len(), 31);
        assert_eq!(out.focus_row, Some(5));
    }

    #[test]
    fn placeholders_are_not_clickable() {
        let cal = calendar().with_month(DisplayedMonth::new(2024, 2).expect("month"));
        let out = cal.draw(&ctx());
        let first_week = out.hits.iter().filter(|h| h.row == 3).collect::<Vec<_>>();
        assert_eq!(first_week.len(), 3);
        assert_eq!(first_week[0].cols, 22..27);
        assert_eq!(first_week[0].target, HitTarget::Day(date(2024, 2, 1)));
    }

    #[test]
    fn wrap_selection_breaks_between_keys() {
        let keys: Vec<DateKey> = ["01-01-2024", "15-01-2024", "20-01-2024"]
            .into_iter()
            .map(|k| k.parse().expect("key"))
            .collect();
        assert_eq!(
            wrap_selection(&keys, 80),
            vec!["[01-01-2024, 15-01-2024, 20-01-2024]".to_string()]
        );
        assert_eq!(
            wrap_selection(&keys, 26),
            vec![
                "[01-01-2024, 15-01-2024,".to_string(),
                "20-01-2024]".to_string()
            ]
        );
        assert!(wrap_selection(&[], 10).is_empty());
    }
}
