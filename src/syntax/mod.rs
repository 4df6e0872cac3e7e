//! Syntax-level helpers over green elements.
//!
//! The zipper works directly on rowan green nodes and tokens. This module
//! classifies them (forms, trivia, collections), builds new ones and provides
//! the semantic-value interpreter ([`sexpr`]) and its printer.

mod tag;
mod value;

pub use tag::NodeTag;
pub use value::{Value, sexpr};

use crate::parser::SyntaxKind;
use rowan::{GreenNode, GreenNodeData, GreenToken, GreenTokenData, NodeOrToken};
use text_size::TextSize;

/// An owned green element (node or token)
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// A borrowed green element, as yielded by `GreenNodeData::children`
pub type GreenElementRef<'a> = NodeOrToken<&'a GreenNodeData, &'a GreenTokenData>;

// ============================================================================
// Conversions
// ============================================================================

pub fn as_ref(el: &GreenElement) -> GreenElementRef<'_> {
    match el {
        NodeOrToken::Node(node) => NodeOrToken::Node(&**node),
        NodeOrToken::Token(token) => NodeOrToken::Token(&**token),
    }
}

pub fn to_owned_element(el: GreenElementRef<'_>) -> GreenElement {
    match el {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
    }
}

/// Owned copies of every child of a node, trivia and delimiters included
pub fn children_of(node: &GreenNodeData) -> Vec<GreenElement> {
    node.children().map(to_owned_element).collect()
}

// ============================================================================
// Classification
// ============================================================================

pub fn kind_of(el: GreenElementRef<'_>) -> SyntaxKind {
    match el {
        NodeOrToken::Node(node) => node.kind().into(),
        NodeOrToken::Token(token) => token.kind().into(),
    }
}

pub fn kind(el: &GreenElement) -> SyntaxKind {
    kind_of(as_ref(el))
}

/// Whitespace, commas, comments and `#_` discards
pub fn is_trivia_ref(el: GreenElementRef<'_>) -> bool {
    let kind = kind_of(el);
    kind.is_trivia() || kind == SyntaxKind::DISCARD_FORM
}

/// Whitespace and commas (comments excluded)
pub fn is_whitespace_kind(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::WHITESPACE | SyntaxKind::COMMA)
}

/// A form is anything a cursor may rest on: atoms and non-trivia nodes.
/// Delimiters, reader prefixes and trivia are never forms.
pub fn is_form_kind(kind: SyntaxKind) -> bool {
    kind.is_atom() || kind.is_collection() || kind.is_prefix_form()
}

pub fn is_form_ref(el: GreenElementRef<'_>) -> bool {
    is_form_kind(kind_of(el))
}

pub fn is_form(el: &GreenElement) -> bool {
    is_form_kind(kind(el))
}

/// Forms among the children of a node, in order
pub fn forms_of(node: &GreenNodeData) -> Vec<GreenElementRef<'_>> {
    node.children().filter(|c| is_form_ref(*c)).collect()
}

// ============================================================================
// Text
// ============================================================================

pub fn text_len(el: GreenElementRef<'_>) -> TextSize {
    match el {
        NodeOrToken::Node(node) => node.text_len(),
        NodeOrToken::Token(token) => token.text_len(),
    }
}

/// Render an element back to source text
pub fn element_text(el: GreenElementRef<'_>) -> String {
    let mut buf = String::new();
    write_text(el, &mut buf);
    buf
}

pub fn text_of(el: &GreenElement) -> String {
    element_text(as_ref(el))
}

fn write_text(el: GreenElementRef<'_>, buf: &mut String) {
    match el {
        NodeOrToken::Token(token) => buf.push_str(token.text()),
        NodeOrToken::Node(node) => {
            for child in node.children() {
                write_text(child, buf);
            }
        }
    }
}

/// Text of a token element, `None` for nodes
pub fn token_text(el: GreenElementRef<'_>) -> Option<&str> {
    match el {
        NodeOrToken::Token(token) => Some(token.text()),
        NodeOrToken::Node(_) => None,
    }
}

// ============================================================================
// Construction
// ============================================================================

pub fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

pub fn whitespace(text: &str) -> GreenElement {
    token(SyntaxKind::WHITESPACE, text)
}

pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

/// Build a collection node around `inner`, adding its delimiters.
/// Returns `None` when `kind` is not a collection kind.
pub fn collection(kind: SyntaxKind, inner: Vec<GreenElement>) -> Option<GreenNode> {
    let ((open_kind, open), (close_kind, close)) = kind.delimiters()?;
    let mut children = Vec::with_capacity(inner.len() + 2);
    children.push(token(open_kind, open));
    children.extend(inner);
    children.push(token(close_kind, close));
    Some(node(kind, children))
}

/// Print a value and read it back as a single green element
pub fn element_from_value(value: &Value) -> Result<GreenElement, String> {
    crate::parser::parse_form(&value.to_string())
}

/// Children of a collection between its delimiters
pub fn collection_inner(node: &GreenNodeData) -> Vec<GreenElement> {
    let children = children_of(node);
    if children.len() < 2 {
        return Vec::new();
    }
    children[1..children.len() - 1].to_vec()
}
