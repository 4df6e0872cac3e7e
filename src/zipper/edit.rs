//! Node-level edits: replace, insert, remove.

use super::cursor::{Cursor, Frame, splice};
use crate::error::{EditError, Result};
use crate::parser::SyntaxKind;
use crate::syntax::{self, GreenElement, NodeTag, is_whitespace_kind};
use rowan::{GreenNode, NodeOrToken};

impl Cursor {
    /// Replace the focused element; the cursor lands on the replacement
    pub fn replace(&self, new: GreenElement) -> Result<Cursor> {
        let frame = self
            .frame()
            .ok_or_else(|| EditError::not_applicable("cannot replace the document root"))?;
        let index = frame.index;
        let parent = splice(&frame.parent, index..index + 1, vec![new]);
        self.with_parent(parent, index).ok_or_else(lost_focus)
    }

    /// Insert `el` as the left sibling; the cursor stays on the current node
    pub fn insert_left(&self, el: GreenElement, sep: &str) -> Result<Cursor> {
        let frame = self.sibling_frame("the document root has no siblings")?;
        let index = frame.index;
        let parent = splice(&frame.parent, index..index, vec![el, syntax::whitespace(sep)]);
        self.with_parent(parent, index + 2).ok_or_else(lost_focus)
    }

    /// Insert `el` as the right sibling; the cursor stays on the current node
    pub fn insert_right(&self, el: GreenElement, sep: &str) -> Result<Cursor> {
        let frame = self.sibling_frame("the document root has no siblings")?;
        let index = frame.index;
        let parent = splice(
            &frame.parent,
            index + 1..index + 1,
            vec![syntax::whitespace(sep), el],
        );
        self.with_parent(parent, index).ok_or_else(lost_focus)
    }

    /// Insert `el` as the first child of the focused collection
    pub fn insert_child(&self, el: GreenElement, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let mut children = syntax::children_of(node);
        let mut items = vec![el];
        if has_content(&children[1..children.len() - 1]) {
            items.push(syntax::whitespace(sep));
        }
        children.splice(1..1, items);
        self.replace(NodeOrToken::Node(GreenNode::new(node.kind(), children)))
    }

    /// Append `el` as the last child of the focused collection
    pub fn append_child(&self, el: GreenElement, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let mut children = syntax::children_of(node);
        let close = children.len() - 1;
        let mut items = Vec::new();
        if has_content(&children[1..close]) {
            items.push(syntax::whitespace(sep));
        }
        items.push(el);
        children.splice(close..close, items);
        self.replace(NodeOrToken::Node(GreenNode::new(node.kind(), children)))
    }

    /// Remove the focused element together with the whitespace that separated
    /// it from its neighbours. The cursor moves to the left sibling, or to the
    /// parent when there is none.
    pub fn remove(&self) -> Result<Cursor> {
        let frame = self.sibling_frame("cannot remove the document root")?;
        let children = syntax::children_of(&frame.parent);
        let (start, end) = removal_range(&children, frame.index, frame.index + 1);
        let parent = splice(&frame.parent, start..end, Vec::new());
        Ok(self.settle(parent, start))
    }

    /// Cursor after elements before `start` in `parent` were kept and some
    /// were taken out: the nearest form to the left, else the parent itself.
    pub(crate) fn settle(&self, parent: GreenNode, start: usize) -> Cursor {
        let target = parent
            .children()
            .take(start)
            .enumerate()
            .filter(|(_, c)| syntax::is_form_ref(*c))
            .last()
            .map(|(i, _)| i);
        let parent_cursor = self.rebuilt_parent(parent);
        match target.and_then(|i| parent_cursor.child_at(i)) {
            Some(cursor) => cursor,
            None => parent_cursor,
        }
    }

    /// The parent frame for an edit that changes how many forms the parent
    /// holds. Fails at the root (with `at_root`) and inside reader-prefix
    /// forms, whose arity is fixed.
    pub(crate) fn sibling_frame(&self, at_root: &str) -> Result<&Frame> {
        let frame = self
            .frame()
            .ok_or_else(|| EditError::not_applicable(at_root))?;
        let parent = SyntaxKind::from(frame.parent.kind());
        if parent.is_prefix_form() {
            return Err(EditError::not_applicable(format!(
                "a {} holds a fixed number of forms",
                NodeTag::from(parent)
            )));
        }
        Ok(frame)
    }

    /// The focused collection node, or `OperationNotApplicable`
    pub(crate) fn collection(&self) -> Result<&GreenNode> {
        match self.node() {
            Some(node) if self.is_collection() => Ok(node),
            _ => Err(EditError::not_applicable(format!(
                "current node is a {}, not a collection",
                self.tag()
            ))),
        }
    }
}

/// Widen `start..end` over the whitespace run before it, or after it when
/// nothing precedes. Whitespace that ends a comment line is kept.
pub(crate) fn removal_range(children: &[GreenElement], start: usize, end: usize) -> (usize, usize) {
    let is_ws = |i: usize| is_whitespace_kind(syntax::kind(&children[i]));

    let mut new_start = start;
    while new_start > 0 && is_ws(new_start - 1) {
        new_start -= 1;
    }
    let after_comment = new_start > 0 && syntax::kind(&children[new_start - 1]) == SyntaxKind::COMMENT;
    if new_start < start && !after_comment {
        return (new_start, end);
    }

    let mut new_end = end;
    while new_end < children.len() && is_ws(new_end) {
        new_end += 1;
    }
    (start, new_end)
}

/// Anything other than whitespace between two delimiters
pub(crate) fn has_content(inner: &[GreenElement]) -> bool {
    inner.iter().any(|el| !is_whitespace_kind(syntax::kind(el)))
}

pub(crate) fn lost_focus() -> EditError {
    EditError::not_applicable("edit left no node at the cursor position")
}
