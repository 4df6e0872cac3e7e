//! # zipedit-base
//!
//! Structural editing of Clojure source over a lossless syntax tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! engine    → Sessions, search, bulk edits, introspection, envelopes
//!   ↓
//! zipper    → Persistent cursor, navigation, edits, paredit, paths
//!   ↓
//! syntax    → Node classification, green-element helpers, semantic values
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, SyntaxKind
//!   ↓
//! base      → Primitives (TextRange, LineIndex, Position, Span)
//! ```
//!
//! `config` and `error` are shared by every layer above `syntax`.

// ============================================================================
// MODULES (dependency order: base → parser → syntax → zipper → engine)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position/Span
pub mod base;

/// Parser: Logos lexer, recursive-descent parser producing green trees
pub mod parser;

/// Syntax: node tags, trivia/form classification, semantic values
pub mod syntax;

/// Zipper: persistent cursor with navigation and structural edits
pub mod zipper;

/// Engine: session store and the `Editor` facade
pub mod engine;

/// Editor configuration
pub mod config;

/// Error taxonomy
pub mod error;

// Re-export commonly needed items
pub use config::EditorConfig;
pub use engine::{Editor, Envelope, NodeInfo, Source, ZipperInfo};
pub use error::{EditError, ErrorKind, Result};
pub use syntax::Value;
pub use zipper::{CollectionTarget, Cursor, Direction, Path, PathStep, SearchDirection, WrapperKind};

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};
