//! Step paths, resolved from the document root on each use.

use super::Cursor;
use crate::error::{EditError, Result};
use rowan::GreenNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a [`Path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStep {
    Up,
    Down,
    Left,
    Right,
    /// The n-th form among the children of the current node
    Nth(usize),
}

impl PathStep {
    fn apply(self, cursor: &Cursor) -> Option<Cursor> {
        match self {
            PathStep::Up => cursor.up(),
            PathStep::Down => cursor.down(),
            PathStep::Left => cursor.left(),
            PathStep::Right => cursor.right(),
            PathStep::Nth(n) => cursor.nth_child(n),
        }
    }

    /// Change in nesting this step causes
    fn nesting(self) -> isize {
        match self {
            PathStep::Down | PathStep::Nth(_) => 1,
            PathStep::Up => -1,
            PathStep::Left | PathStep::Right => 0,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Up => f.write_str("up"),
            PathStep::Down => f.write_str("down"),
            PathStep::Left => f.write_str("left"),
            PathStep::Right => f.write_str("right"),
            PathStep::Nth(n) => write!(f, "nth({n})"),
        }
    }
}

/// A sequence of steps starting at the `ROOT` node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<PathStep>);

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Net nesting depth reached by the path
    pub fn depth(&self) -> isize {
        self.0.iter().map(|step| step.nesting()).sum()
    }

    /// Walk the path from the root of `root`
    pub fn resolve(&self, root: &GreenNode) -> Result<Cursor> {
        let mut cursor = Cursor::new(root.clone());
        for (i, step) in self.0.iter().enumerate() {
            cursor = step.apply(&cursor).ok_or_else(|| {
                EditError::not_found(format!("path step {i} ({step}) has no target"))
            })?;
        }
        Ok(cursor)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}
