use std::ops::Range;

use crate::calendar::CalendarDate;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyEvent, TerminalSize};
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub focused_id: Option<String>,
    pub terminal_size: TerminalSize,
    pub theme: Theme,
}

/// What a click on a region of the screen activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    PrevMonth,
    NextMonth,
    Day(CalendarDate),
}

/// A clickable column span on one line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub row: u16,
    pub cols: Range<u16>,
    pub target: HitTarget,
}

impl HitRegion {
    pub fn contains(&self, col: u16, row: usize) -> bool {
        self.row as usize == row && self.cols.contains(&col)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Rows are relative to the first line of this output.
    pub hits: Vec<HitRegion>,
    /// Line that should stay on screen when the output is taller than the terminal.
    pub focus_row: Option<u16>,
}

impl DrawOutput {
    pub fn next_row(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// A click landed on one of this node's hit regions.
    fn on_hit(&mut self, _target: HitTarget) -> InteractionResult {
        InteractionResult::ignored()
    }
}
