use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CtEvent, KeyCode as CtKeyCode,
    KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers as CtKeyModifiers, MouseButton,
    MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::renderer::RenderFrame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Esc,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Anything the calendar has no use for.
    Other,
}

impl From<CtKeyCode> for KeyCode {
    fn from(code: CtKeyCode) -> Self {
        match code {
            CtKeyCode::Char(ch) => Self::Char(ch),
            CtKeyCode::Enter => Self::Enter,
            CtKeyCode::Tab => Self::Tab,
            CtKeyCode::Esc => Self::Esc,
            CtKeyCode::Home => Self::Home,
            CtKeyCode::End => Self::End,
            CtKeyCode::Left => Self::Left,
            CtKeyCode::Right => Self::Right,
            CtKeyCode::Up => Self::Up,
            CtKeyCode::Down => Self::Down,
            CtKeyCode::PageUp => Self::PageUp,
            CtKeyCode::PageDown => Self::PageDown,
            _ => Self::Other,
        }
    }
}

/// Bit set of held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(0b001);
    pub const CONTROL: Self = Self(0b010);
    pub const ALT: Self = Self(0b100);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<CtKeyModifiers> for KeyModifiers {
    fn from(modifiers: CtKeyModifiers) -> Self {
        [
            (CtKeyModifiers::SHIFT, Self::SHIFT),
            (CtKeyModifiers::CONTROL, Self::CONTROL),
            (CtKeyModifiers::ALT, Self::ALT),
        ]
        .into_iter()
        .filter(|(ct, _)| modifiers.contains(*ct))
        .fold(Self::NONE, |acc, (_, ours)| acc.union(ours))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<CtKeyEvent> for KeyEvent {
    fn from(key: CtKeyEvent) -> Self {
        Self {
            code: key.code.into(),
            modifiers: key.modifiers.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(TerminalSize),
    /// Left button press at a screen position.
    Click(CursorPos),
    /// Wheel movement in lines, positive is down.
    Scroll(i32),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

impl TerminalSize {
    fn current() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

const WHEEL_LINES: i32 = 3;

/// Which slice of a frame taller than the screen is visible.
#[derive(Debug, Default)]
struct Viewport {
    offset: usize,
    /// Set by the mouse wheel; cleared by the next key press.
    pinned: bool,
    last_lines: Vec<SpanLine>,
}

impl Viewport {
    fn follow(&mut self, focus_row: Option<u16>, frame_len: usize, height: usize) {
        if !self.pinned {
            self.offset = focus_row
                .map(|row| (row as usize + 1).saturating_sub(height))
                .unwrap_or(0);
        }
        self.offset = self.offset.min(frame_len.saturating_sub(height));
    }
}

/// Alternate-screen terminal with mouse capture.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    viewport: Viewport,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize::current()?,
            viewport: Viewport::default(),
        })
    }

    pub fn scroll(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.viewport.pinned = true;
        self.viewport.offset = self.viewport.offset.saturating_add_signed(delta as isize);
    }

    pub fn reset_scroll(&mut self) {
        self.viewport.pinned = false;
    }

    /// Frame line shown at screen row `row`.
    pub fn frame_row(&self, row: u16) -> usize {
        self.viewport.offset + row as usize
    }

    pub fn enter(&mut self) -> io::Result<()> {
        self.size = TerminalSize::current()?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
    }

    /// Restores the normal screen and prints the last frame there so the
    /// final selection stays in the scrollback.
    pub fn exit(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            DisableMouseCapture,
            LeaveAlternateScreen,
            EnableLineWrap,
            Show
        )?;

        let width = TerminalSize::current()?.width as usize;
        for line in std::mem::take(&mut self.viewport.last_lines) {
            write_line(&mut self.stdout, &line, width)?;
            self.stdout.write_all(b"\r\n")?;
        }
        self.stdout.flush()
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        let mapped = match event::read()? {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => TerminalEvent::Key(key.into()),
            CtEvent::Resize(width, height) => TerminalEvent::Resize(TerminalSize { width, height }),
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => TerminalEvent::Click(CursorPos {
                    col: mouse.column,
                    row: mouse.row,
                }),
                MouseEventKind::ScrollUp => TerminalEvent::Scroll(-WHEEL_LINES),
                MouseEventKind::ScrollDown => TerminalEvent::Scroll(WHEEL_LINES),
                _ => TerminalEvent::Tick,
            },
            _ => TerminalEvent::Tick,
        };
        Ok(mapped)
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    /// Repaints the whole screen, keeping `frame.focus_row` visible unless
    /// the user scrolled away with the wheel.
    pub fn render_frame(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.size = TerminalSize::current()?;
        let height = self.size.height as usize;
        // One column stays free so the last cell never triggers a wrap.
        let width = (self.size.width as usize).saturating_sub(1).max(1);
        if self.size.height == 0 || self.size.width == 0 {
            return Ok(());
        }

        self.viewport.follow(frame.focus_row, frame.lines.len(), height);
        self.viewport.last_lines.clone_from(&frame.lines);

        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        let visible = frame.lines.iter().skip(self.viewport.offset).take(height);
        for (row, line) in visible.enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            write_line(&mut self.stdout, line, width)?;
        }
        self.stdout.flush()
    }
}

fn write_line(out: &mut impl Write, line: &SpanLine, max_cols: usize) -> io::Result<()> {
    let mut used = 0usize;
    for span in line {
        let text = clip_to_width(&span.text, max_cols.saturating_sub(used));
        if text.is_empty() {
            continue;
        }
        let style = span.style;
        if let Some(color) = style.color {
            queue!(out, SetForegroundColor(color.into()))?;
        }
        if let Some(color) = style.background {
            queue!(out, SetBackgroundColor(color.into()))?;
        }
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(&text), SetAttribute(Attribute::Reset), ResetColor)?;
        used += UnicodeWidthStr::width(text.as_str());
    }
    Ok(())
}

impl From<Color> for CtColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => CtColor::Reset,
            Color::Black => CtColor::Black,
            Color::DarkGrey => CtColor::DarkGrey,
            Color::Red => CtColor::Red,
            Color::Green => CtColor::Green,
            Color::Yellow => CtColor::DarkYellow,
            Color::Blue => CtColor::DarkBlue,
            Color::Magenta => CtColor::DarkMagenta,
            Color::Cyan => CtColor::DarkCyan,
            Color::White => CtColor::White,
        }
    }
}

/// Longest prefix of `text` that fits in `max_cols` terminal columns.
fn clip_to_width(text: &str, max_cols: usize) -> String {
    let mut used = 0usize;
    text.chars()
        .filter(|ch| !matches!(ch, '\n' | '\r'))
        .take_while(|ch| {
            used += UnicodeWidthChar::width(*ch).unwrap_or(0);
            used <= max_cols
        })
        .collect()
}
