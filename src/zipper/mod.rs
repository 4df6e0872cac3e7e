//! Zipper over the lossless syntax tree.
//!
//! [`Cursor`] is a persistent focus into one generation of a green tree. Moves
//! return new cursors; edits return a cursor into a new tree that shares every
//! untouched subtree with the old one.
//!
//! ## Module Structure
//!
//! - `cursor`     - focus, ancestor frames, trivia-skipping navigation
//! - `edit`       - replace / insert / remove
//! - `paredit`    - slurp, barf, wrap, splice, unwrap
//! - `collection` - map and collection-type edits
//! - `path`       - step paths resolved from the document root

mod collection;
mod cursor;
mod edit;
mod paredit;
mod path;

pub use cursor::Cursor;
pub use path::{Path, PathStep};

use crate::parser::SyntaxKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directional move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Next,
    Prev,
    Leftmost,
    Rightmost,
}

impl Direction {
    pub fn apply(self, cursor: &Cursor) -> Option<Cursor> {
        match self {
            Direction::Up => cursor.up(),
            Direction::Down => cursor.down(),
            Direction::Left => cursor.left(),
            Direction::Right => cursor.right(),
            Direction::Next => cursor.next(),
            Direction::Prev => cursor.prev(),
            Direction::Leftmost => cursor.leftmost(),
            Direction::Rightmost => cursor.rightmost(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Next => "next",
            Direction::Prev => "prev",
            Direction::Leftmost => "leftmost",
            Direction::Rightmost => "rightmost",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan order for searches that start at the current node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchDirection {
    Next,
    Prev,
}

impl SearchDirection {
    /// Cursors visited by a scan in this direction, excluding `from` itself
    pub fn scan(self, from: &Cursor) -> Box<dyn Iterator<Item = Cursor>> {
        match self {
            SearchDirection::Next => Box::new(from.successors()),
            SearchDirection::Prev => Box::new(from.predecessors()),
        }
    }
}

/// Collection a form can be wrapped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapperKind {
    List,
    Vector,
    Map,
    Set,
    Fn,
}

impl WrapperKind {
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            WrapperKind::List => SyntaxKind::LIST,
            WrapperKind::Vector => SyntaxKind::VECTOR,
            WrapperKind::Map => SyntaxKind::MAP,
            WrapperKind::Set => SyntaxKind::SET,
            WrapperKind::Fn => SyntaxKind::FN,
        }
    }
}

/// Target of a collection-type transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionTarget {
    Vector,
    List,
    Set,
}
