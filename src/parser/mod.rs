//! Rowan-based lossless parser for Clojure source
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST preserves all whitespace, commas and comments, so rendering an
//! unedited tree reproduces the input byte-for-byte.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! Cursor (zipper) → navigation and path-copying edits over green nodes
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse, parse_form};
pub use syntax_kind::{ClojureLanguage, SyntaxKind, SyntaxNode};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, GreenToken};
