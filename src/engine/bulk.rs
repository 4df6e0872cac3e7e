//! Multi-site edits applied against one evolving tree.
//!
//! Each item re-resolves its path from the current root. Items are applied
//! deepest path first so that edits inside a subtree run before edits that
//! might shift the subtree's position. Edits are not transactional: an item
//! that fails is skipped and earlier items stay applied.

use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::parser::parse_form;
use crate::zipper::{Cursor, Path, WrapperKind};
use rowan::GreenNode;
use serde::Deserialize;
use std::cmp::Reverse;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkKind {
    InsertBefore,
    InsertAfter,
    /// Appended as the last child of the collection at the path
    InsertChild,
    Replace,
}

/// One item of a bulk insert
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkOperation {
    pub path: Path,
    pub kind: BulkKind,
    pub content: String,
}

impl BulkOperation {
    pub fn new(path: Path, kind: BulkKind, content: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            content: content.into(),
        }
    }

    fn apply(&self, root: &GreenNode, config: &EditorConfig) -> Result<GreenNode> {
        let cursor = self.path.resolve(root)?;
        let form = parse_form(&self.content).map_err(EditError::parse)?;
        let sep = config.separator_for(cursor.parent_is_root());
        let edited = match self.kind {
            BulkKind::InsertBefore => cursor.insert_left(form, sep)?,
            BulkKind::InsertAfter => cursor.insert_right(form, sep)?,
            BulkKind::InsertChild => cursor.append_child(form, &config.sibling_separator)?,
            BulkKind::Replace => cursor.replace(form)?,
        };
        Ok(edited.root())
    }
}

/// Stable order: deepest paths first, ties in caller order
fn by_depth<T>(items: &mut [T], path: impl Fn(&T) -> &Path) {
    items.sort_by_key(|item| Reverse(path(item).depth()));
}

/// Apply every operation; returns the final root and the number attempted
pub fn insert_all(
    root: GreenNode,
    mut operations: Vec<BulkOperation>,
    config: &EditorConfig,
) -> (GreenNode, usize) {
    by_depth(&mut operations, |op| &op.path);
    let attempted = operations.len();
    let root = operations.iter().fold(root, |root, op| match op.apply(&root, config) {
        Ok(next) => next,
        Err(err) => {
            warn!(path = ?op.path, kind = ?op.kind, error = %err, "skipped bulk insert item");
            root
        }
    });
    debug!(attempted, "bulk insert finished");
    (root, attempted)
}

/// Wrap the node at every path; returns the final root and the number attempted
pub fn wrap_all(root: GreenNode, mut paths: Vec<Path>, kind: WrapperKind) -> (GreenNode, usize) {
    by_depth(&mut paths, |path| path);
    let attempted = paths.len();
    let root = paths.iter().fold(root, |root, path| {
        match path.resolve(&root).and_then(|cursor| cursor.wrap(kind)) {
            Ok(wrapped) => wrapped.root(),
            Err(err) => {
                warn!(?path, error = %err, "skipped bulk wrap item");
                root
            }
        }
    });
    debug!(attempted, ?kind, "bulk wrap finished");
    (root, attempted)
}

/// Replace atom tokens whose text is `target`, one at a time from the
/// document start, at most `config.replace_iteration_cap` times. Returns the
/// final root and the number of replacements.
pub fn find_and_replace(
    root: GreenNode,
    target: &str,
    replacement: &str,
    config: &EditorConfig,
) -> Result<(GreenNode, usize)> {
    let form = parse_form(replacement).map_err(EditError::parse)?;
    let mut root = root;
    let mut count = 0;
    while count < config.replace_iteration_cap {
        let Some(found) = Cursor::new(root.clone())
            .successors()
            .find(|cursor| cursor.kind().is_atom() && cursor.text() == target)
        else {
            break;
        };
        root = found.replace(form.clone())?.root();
        count += 1;
    }
    if count == config.replace_iteration_cap {
        debug!(pattern = target, cap = count, "find and replace hit the iteration cap");
    }
    Ok((root, count))
}
