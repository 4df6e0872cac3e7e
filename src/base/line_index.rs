//! Byte offset ↔ line/column conversion.

use super::{Position, Span};
use text_size::{TextRange, TextSize};

/// Line start offsets of one rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: String,
    newlines: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text
            .char_indices()
            .filter(|(_, c)| *c == '\n')
            .map(|(i, _)| TextSize::new(i as u32 + 1))
            .collect();
        Self {
            text: text.to_string(),
            newlines,
        }
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(self.text.as_str()));
        let line = self.newlines.partition_point(|start| *start <= offset);
        let line_start = if line == 0 {
            TextSize::new(0)
        } else {
            self.newlines[line - 1]
        };
        let column = self.text[usize::from(line_start)..usize::from(offset)]
            .chars()
            .count();
        Position::new(line, column)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}
