//! Persistent cursor over a green tree.
//!
//! A [`Cursor`] is the focused element plus one [`Frame`] per ancestor. A
//! frame holds the ancestor node itself (the parent shell with its full child
//! list) and the index of the child the cursor descended into, so left and
//! right siblings are always `parent.children()[..index]` and
//! `[index + 1..]`.
//!
//! Frames are kept consistent with the focus: every edit rebuilds the chain
//! of ancestors bottom-up (path copying), leaving every earlier cursor and the
//! tree it points into untouched.

use crate::base::{TextRange, TextSize};
use crate::parser::SyntaxKind;
use crate::syntax::{
    self, GreenElement, GreenElementRef, NodeTag, Value, forms_of, is_form_ref, to_owned_element,
};
use rowan::{GreenNode, GreenNodeData, NodeOrToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) parent: GreenNode,
    pub(crate) index: usize,
}

/// Immutable pointer into one generation of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    focus: GreenElement,
    frames: Vec<Frame>,
}

impl Cursor {
    /// Cursor on the root node itself
    pub fn new(root: GreenNode) -> Self {
        Self {
            focus: NodeOrToken::Node(root),
            frames: Vec::new(),
        }
    }

    /// Cursor on the first top-level form, or on the root of an empty document
    pub fn start(root: GreenNode) -> Self {
        let cursor = Self::new(root);
        cursor.down().unwrap_or(cursor)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn element(&self) -> &GreenElement {
        &self.focus
    }

    pub fn focus(&self) -> GreenElementRef<'_> {
        syntax::as_ref(&self.focus)
    }

    pub fn kind(&self) -> SyntaxKind {
        syntax::kind(&self.focus)
    }

    pub fn tag(&self) -> NodeTag {
        self.kind().into()
    }

    pub fn text(&self) -> String {
        syntax::text_of(&self.focus)
    }

    pub fn value(&self) -> Option<Value> {
        syntax::sexpr(self.focus())
    }

    pub fn is_collection(&self) -> bool {
        self.kind().is_collection()
    }

    /// The focused node, `None` when the focus is a token
    pub fn node(&self) -> Option<&GreenNode> {
        match &self.focus {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Forms among the focused node's children
    pub fn child_forms(&self) -> Vec<GreenElementRef<'_>> {
        self.node().map(|node| forms_of(node)).unwrap_or_default()
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Number of ancestors; the root has depth 0
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn parent_kind(&self) -> Option<SyntaxKind> {
        self.frame().map(|f| SyntaxKind::from(f.parent.kind()))
    }

    /// Whether the focus is a top-level form
    pub fn parent_is_root(&self) -> bool {
        self.frames.len() == 1
    }

    /// Root of the tree generation this cursor belongs to
    pub fn root(&self) -> GreenNode {
        match (self.frames.first(), &self.focus) {
            (Some(frame), _) => frame.parent.clone(),
            (None, NodeOrToken::Node(node)) => node.clone(),
            // a token is never stored without a parent frame
            (None, NodeOrToken::Token(token)) => {
                syntax::node(SyntaxKind::ROOT, vec![NodeOrToken::Token(token.clone())])
            }
        }
    }

    pub fn root_text(&self) -> String {
        syntax::text_of(&NodeOrToken::Node(self.root()))
    }

    /// Byte offset of the focus within the rendered root
    pub fn offset(&self) -> TextSize {
        self.frames
            .iter()
            .flat_map(|f| f.parent.children().take(f.index).map(syntax::text_len))
            .fold(TextSize::new(0), |acc, len| acc + len)
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset(), syntax::text_len(self.focus()))
    }

    fn siblings(&self) -> Option<(&GreenNodeData, usize)> {
        self.frame().map(|f| (&*f.parent, f.index))
    }

    pub fn has_left_sibling(&self) -> bool {
        self.left().is_some()
    }

    pub fn has_right_sibling(&self) -> bool {
        self.right().is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.child_forms().is_empty()
    }

    /// No form follows this one in depth-first order
    pub fn is_end(&self) -> bool {
        self.next().is_none()
    }

    // =========================================================================
    // Raw moves (any child index, trivia included)
    // =========================================================================

    pub(crate) fn child_at(&self, index: usize) -> Option<Cursor> {
        let node = self.node()?;
        let child = node.children().nth(index).map(to_owned_element)?;
        let mut frames = self.frames.clone();
        frames.push(Frame {
            parent: node.clone(),
            index,
        });
        Some(Cursor {
            focus: child,
            frames,
        })
    }

    fn sibling_at(&self, index: usize) -> Option<Cursor> {
        let frame = self.frame()?;
        let child = frame.parent.children().nth(index).map(to_owned_element)?;
        let mut frames = self.frames.clone();
        if let Some(last) = frames.last_mut() {
            last.index = index;
        }
        Some(Cursor {
            focus: child,
            frames,
        })
    }

    // =========================================================================
    // Navigation (forms only)
    // =========================================================================

    pub fn up(&self) -> Option<Cursor> {
        let mut frames = self.frames.clone();
        let frame = frames.pop()?;
        Some(Cursor {
            focus: NodeOrToken::Node(frame.parent),
            frames,
        })
    }

    pub fn down(&self) -> Option<Cursor> {
        let index = self.node()?.children().position(is_form_ref)?;
        self.child_at(index)
    }

    /// The `n`-th form among the focused node's children
    pub fn nth_child(&self, n: usize) -> Option<Cursor> {
        let index = self
            .node()?
            .children()
            .enumerate()
            .filter(|(_, c)| is_form_ref(*c))
            .nth(n)
            .map(|(i, _)| i)?;
        self.child_at(index)
    }

    pub fn right(&self) -> Option<Cursor> {
        let (parent, index) = self.siblings()?;
        let target = parent
            .children()
            .enumerate()
            .skip(index + 1)
            .find(|(_, c)| is_form_ref(*c))
            .map(|(i, _)| i)?;
        self.sibling_at(target)
    }

    pub fn left(&self) -> Option<Cursor> {
        let (parent, index) = self.siblings()?;
        let target = parent
            .children()
            .enumerate()
            .take(index)
            .filter(|(_, c)| is_form_ref(*c))
            .last()
            .map(|(i, _)| i)?;
        self.sibling_at(target)
    }

    pub fn leftmost(&self) -> Option<Cursor> {
        let (parent, _) = self.siblings()?;
        let target = parent.children().position(is_form_ref)?;
        self.sibling_at(target)
    }

    pub fn rightmost(&self) -> Option<Cursor> {
        let (parent, _) = self.siblings()?;
        let target = parent
            .children()
            .enumerate()
            .filter(|(_, c)| is_form_ref(*c))
            .last()
            .map(|(i, _)| i)?;
        self.sibling_at(target)
    }

    /// Next form in depth-first pre-order
    pub fn next(&self) -> Option<Cursor> {
        if let Some(child) = self.down() {
            return Some(child);
        }
        let mut current = self.clone();
        loop {
            if let Some(right) = current.right() {
                return Some(right);
            }
            current = current.up()?;
        }
    }

    /// Previous form in depth-first pre-order; the first child steps to its parent
    pub fn prev(&self) -> Option<Cursor> {
        let Some(mut current) = self.left() else {
            return self.up();
        };
        while let Some(child) = current.down() {
            current = child.rightmost().unwrap_or(child);
        }
        Some(current)
    }

    /// Every form after this one in depth-first order
    pub fn successors(&self) -> impl Iterator<Item = Cursor> + use<> {
        std::iter::successors(self.next(), Cursor::next)
    }

    /// Every form before this one in reverse depth-first order
    pub fn predecessors(&self) -> impl Iterator<Item = Cursor> + use<> {
        std::iter::successors(self.prev(), Cursor::prev)
    }

    // =========================================================================
    // Rebuilding
    // =========================================================================

    /// Cursor on a replacement for this cursor's parent, with every ancestor
    /// above it rebuilt. Must only be called on a non-root cursor.
    pub(crate) fn rebuilt_parent(&self, parent: GreenNode) -> Cursor {
        let mut frames = self.frames[..self.frames.len().saturating_sub(1)].to_vec();
        let mut child = parent.clone();
        for frame in frames.iter_mut().rev() {
            frame.parent = splice(
                &frame.parent,
                frame.index..frame.index + 1,
                vec![NodeOrToken::Node(child)],
            );
            child = frame.parent.clone();
        }
        Cursor {
            focus: NodeOrToken::Node(parent),
            frames,
        }
    }

    /// Replace the parent and focus its `index`-th child
    pub(crate) fn with_parent(&self, parent: GreenNode, index: usize) -> Option<Cursor> {
        self.rebuilt_parent(parent).child_at(index)
    }
}

/// New node with `range` of `node`'s children replaced by `items`
pub(crate) fn splice(
    node: &GreenNodeData,
    range: std::ops::Range<usize>,
    items: Vec<GreenElement>,
) -> GreenNode {
    let mut children = syntax::children_of(node);
    children.splice(range, items);
    GreenNode::new(node.kind(), children)
}
