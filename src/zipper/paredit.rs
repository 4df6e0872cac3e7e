//! Paredit-style structural transforms.
//!
//! All transforms keep delimiters balanced by construction: they move whole
//! elements between a collection and its parent. Comments travel with the
//! forms they sit between; whitespace-only gaps collapse to a separator.

use super::WrapperKind;
use super::cursor::{Cursor, splice};
use super::edit::{has_content, lost_focus};
use crate::error::{EditError, Result};
use crate::parser::SyntaxKind;
use crate::syntax::{self, GreenElement, is_form, is_whitespace_kind};
use rowan::{GreenNode, NodeOrToken};

impl Cursor {
    /// Pull the form after this collection into it as its last child
    pub fn slurp_forward(&self, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let frame = self.sibling_frame("the document root has no siblings")?;
        let siblings = syntax::children_of(&frame.parent);
        let index = frame.index;
        let target = (index + 1..siblings.len())
            .find(|&i| is_form(&siblings[i]))
            .ok_or_else(|| EditError::not_applicable("no form after the collection to slurp"))?;

        let mut children = syntax::children_of(node);
        let close = children.pop().ok_or_else(malformed)?;
        trim_end_whitespace(&mut children);
        let gap = &siblings[index + 1..target];
        if keeps_comments(gap) {
            children.extend(gap.iter().cloned());
        } else if has_content(&children[1..]) {
            children.push(syntax::whitespace(sep));
        }
        children.push(siblings[target].clone());
        children.push(close);

        let slurped = NodeOrToken::Node(GreenNode::new(node.kind(), children));
        let parent = splice(&frame.parent, index..target + 1, vec![slurped]);
        self.with_parent(parent, index).ok_or_else(lost_focus)
    }

    /// Pull the form before this collection into it as its first child
    pub fn slurp_backward(&self, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let frame = self.sibling_frame("the document root has no siblings")?;
        let siblings = syntax::children_of(&frame.parent);
        let index = frame.index;
        let target = (0..index)
            .rev()
            .find(|&i| is_form(&siblings[i]))
            .ok_or_else(|| EditError::not_applicable("no form before the collection to slurp"))?;

        let mut rest = syntax::children_of(node);
        if rest.is_empty() {
            return Err(malformed());
        }
        let open = rest.remove(0);
        trim_start_whitespace(&mut rest);

        let mut children = vec![open, siblings[target].clone()];
        let gap = &siblings[target + 1..index];
        if keeps_comments(gap) {
            children.extend(gap.iter().cloned());
        } else if has_content(&rest[..rest.len().saturating_sub(1)]) {
            children.push(syntax::whitespace(sep));
        }
        children.extend(rest);

        let slurped = NodeOrToken::Node(GreenNode::new(node.kind(), children));
        let parent = splice(&frame.parent, target..index + 1, vec![slurped]);
        self.with_parent(parent, target).ok_or_else(lost_focus)
    }

    /// Push the last child out of this collection, after it
    pub fn barf_forward(&self, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let frame = self.sibling_frame("the document root has no siblings")?;
        let children = syntax::children_of(node);
        let close = children.len().checked_sub(1).ok_or_else(malformed)?;
        let last = (1..close)
            .rev()
            .find(|&i| is_form(&children[i]))
            .ok_or_else(|| EditError::not_applicable("empty collection has nothing to barf"))?;

        let mut kept: Vec<GreenElement> = children[..last].to_vec();
        trim_end_whitespace(&mut kept);
        let trailing = &children[last + 1..close];
        if keeps_comments(trailing) {
            kept.extend(trailing.iter().cloned());
        }
        kept.push(children[close].clone());

        let index = frame.index;
        let barfed = NodeOrToken::Node(GreenNode::new(node.kind(), kept));
        let parent = splice(
            &frame.parent,
            index..index + 1,
            vec![barfed, syntax::whitespace(sep), children[last].clone()],
        );
        self.with_parent(parent, index).ok_or_else(lost_focus)
    }

    /// Push the first child out of this collection, before it
    pub fn barf_backward(&self, sep: &str) -> Result<Cursor> {
        let node = self.collection()?;
        let frame = self.sibling_frame("the document root has no siblings")?;
        let children = syntax::children_of(node);
        let close = children.len().checked_sub(1).ok_or_else(malformed)?;
        let first = (1..close)
            .find(|&i| is_form(&children[i]))
            .ok_or_else(|| EditError::not_applicable("empty collection has nothing to barf"))?;

        let mut kept = vec![children[0].clone()];
        let leading = &children[1..first];
        if keeps_comments(leading) {
            kept.extend(leading.iter().cloned());
        }
        let mut rest = children[first + 1..].to_vec();
        trim_start_whitespace(&mut rest);
        kept.extend(rest);

        let index = frame.index;
        let barfed = NodeOrToken::Node(GreenNode::new(node.kind(), kept));
        let parent = splice(
            &frame.parent,
            index..index + 1,
            vec![children[first].clone(), syntax::whitespace(sep), barfed],
        );
        self.with_parent(parent, index + 2).ok_or_else(lost_focus)
    }

    /// Wrap the focused form in a new collection; the cursor lands on the wrapper
    pub fn wrap(&self, kind: WrapperKind) -> Result<Cursor> {
        if self.is_root() {
            return Err(EditError::not_applicable("cannot wrap the document root"));
        }
        let wrapper = syntax::collection(kind.syntax_kind(), vec![self.element().clone()])
            .ok_or_else(malformed)?;
        self.replace(NodeOrToken::Node(wrapper))
    }

    /// Remove this collection's delimiters, promoting every child (trivia
    /// included) into the parent. The cursor lands on the first promoted form.
    pub fn splice(&self) -> Result<Cursor> {
        let node = self.collection()?;
        let frame = self.sibling_frame("cannot splice the document root")?;
        let inner = syntax::collection_inner(node);
        let first_form = inner.iter().position(is_form);
        let index = frame.index;
        let parent = splice(&frame.parent, index..index + 1, inner);
        match first_form {
            Some(offset) => self
                .with_parent(parent, index + offset)
                .ok_or_else(lost_focus),
            None => Ok(self.settle(parent, index)),
        }
    }

    /// Replace this collection with its first child. Every other child is
    /// dropped; use [`Cursor::splice`] to keep them.
    pub fn unwrap(&self) -> Result<Cursor> {
        let node = self.collection()?;
        let first = syntax::forms_of(node)
            .into_iter()
            .next()
            .map(syntax::to_owned_element)
            .ok_or_else(|| EditError::not_applicable("empty collection has nothing to unwrap"))?;
        self.replace(first)
    }
}

/// A run of trivia is carried along verbatim only when it holds a comment
/// (or a discarded form); plain whitespace is replaced by a separator.
fn keeps_comments(run: &[GreenElement]) -> bool {
    run.iter().any(|el| {
        matches!(
            syntax::kind(el),
            SyntaxKind::COMMENT | SyntaxKind::DISCARD_FORM
        )
    })
}

/// Pop trailing whitespace, but never the line break that ends a comment
fn trim_end_whitespace(elements: &mut Vec<GreenElement>) {
    while let Some(last) = elements.last() {
        if !is_whitespace_kind(syntax::kind(last)) {
            break;
        }
        let len = elements.len();
        if len >= 2 && syntax::kind(&elements[len - 2]) == SyntaxKind::COMMENT {
            break;
        }
        elements.pop();
    }
}

fn trim_start_whitespace(elements: &mut Vec<GreenElement>) {
    let leading = elements
        .iter()
        .take_while(|el| is_whitespace_kind(syntax::kind(el)))
        .count();
    elements.drain(..leading);
}

fn malformed() -> EditError {
    EditError::not_applicable("collection node is missing its delimiters")
}
