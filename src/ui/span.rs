use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::ui::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Terminal columns the text occupies.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

pub type SpanLine = Vec<Span>;

/// Builds a [`SpanLine`] while tracking the column each span lands on.
#[derive(Debug, Default)]
pub struct LineBuilder {
    spans: SpanLine,
    col: u16,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `span` and returns the columns it covers.
    pub fn push(&mut self, span: Span) -> Range<u16> {
        let start = self.col;
        let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
        self.col = self.col.saturating_add(width);
        self.spans.push(span);
        start..self.col
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn finish(self) -> SpanLine {
        self.spans
    }
}

#[cfg(test)]
mod tests {
    use super::{LineBuilder, Span};

    #[test]
    fn line_builder_tracks_display_columns() {
        let mut line = LineBuilder::new();
        assert_eq!(line.push(Span::new("  ")), 0..2);
        assert_eq!(line.push(Span::new("‹ Prev")), 2..8);
        assert_eq!(line.push(Span::new(" 15 ")), 8..12);
        assert_eq!(line.col(), 12);
        assert_eq!(line.finish().len(), 3);
    }
}
