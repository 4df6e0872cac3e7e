//! Foundation types for the editor.
//!
//! This module provides position types used when describing cursor locations:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for nodes
//!
//! This module has NO dependencies on other zipedit modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
