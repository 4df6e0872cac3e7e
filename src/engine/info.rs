//! Introspection of a cursor position.

use crate::base::{LineIndex, Span};
use crate::parser::SyntaxKind;
use crate::syntax::{self, GreenElementRef, NodeTag, Value};
use crate::zipper::Cursor;
use serde::Serialize;
use text_size::{TextRange, TextSize};

/// Full description of the node under the cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub tag: NodeTag,
    pub text: String,
    /// Semantic value; `None` for nodes that are not complete forms
    pub value: Option<Value>,
    pub span: Span,
    pub is_whitespace: bool,
    pub is_comment: bool,
    pub at_document_end: bool,
    pub has_left_sibling: bool,
    pub has_right_sibling: bool,
    pub has_children: bool,
    pub depth: usize,
}

/// Short description of a neighbouring node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub tag: NodeTag,
    pub text: String,
    pub span: Span,
}

/// The cursor's node and its surroundings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipperInfo {
    pub current: NodeInfo,
    pub parent: Option<NodeSummary>,
    pub children: Vec<NodeSummary>,
    pub left_siblings: Vec<NodeSummary>,
    pub right_siblings: Vec<NodeSummary>,
    pub available_operations: Vec<Operation>,
}

/// Edits that can be applied at a cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Replace,
    Edit,
    InsertBefore,
    InsertAfter,
    Remove,
    SlurpForward,
    SlurpBackward,
    BarfForward,
    BarfBackward,
    WrapAround,
    Splice,
    Unwrap,
    Assoc,
    Dissoc,
    Get,
    AppendChild,
    TransformCollectionType,
}

impl NodeInfo {
    pub fn of(cursor: &Cursor) -> Self {
        let index = LineIndex::new(&cursor.root_text());
        Self::with_index(cursor, &index)
    }

    fn with_index(cursor: &Cursor, index: &LineIndex) -> Self {
        let kind = cursor.kind();
        Self {
            tag: cursor.tag(),
            text: cursor.text(),
            value: cursor.value(),
            span: index.span(cursor.range()),
            is_whitespace: syntax::is_whitespace_kind(kind),
            is_comment: kind == SyntaxKind::COMMENT,
            at_document_end: cursor.is_end(),
            has_left_sibling: cursor.has_left_sibling(),
            has_right_sibling: cursor.has_right_sibling(),
            has_children: cursor.has_children(),
            depth: cursor.depth(),
        }
    }
}

impl ZipperInfo {
    pub fn of(cursor: &Cursor) -> Self {
        let index = LineIndex::new(&cursor.root_text());
        let offset = cursor.offset();

        let parent = cursor.up().map(|up| summary_at(&index, up.range(), up.focus()));

        let mut child_start = offset;
        let children = cursor
            .node()
            .map(|node| {
                node.children()
                    .filter_map(|child| {
                        let range = TextRange::at(child_start, syntax::text_len(child));
                        child_start = range.end();
                        syntax::is_form_ref(child).then(|| summary_at(&index, range, child))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (left_siblings, right_siblings) = siblings(cursor, &index);

        Self {
            current: NodeInfo::with_index(cursor, &index),
            parent,
            children,
            left_siblings,
            right_siblings,
            available_operations: available_operations(cursor),
        }
    }
}

fn summary_at(index: &LineIndex, range: TextRange, el: GreenElementRef<'_>) -> NodeSummary {
    NodeSummary {
        tag: syntax::kind_of(el).into(),
        text: syntax::element_text(el),
        span: index.span(range),
    }
}

/// Form siblings on each side, with spans measured from the parent's start
fn siblings(cursor: &Cursor, index: &LineIndex) -> (Vec<NodeSummary>, Vec<NodeSummary>) {
    let Some(parent) = cursor.up() else {
        return (Vec::new(), Vec::new());
    };
    let Some(node) = parent.node() else {
        return (Vec::new(), Vec::new());
    };
    let own = cursor.range();
    let mut start: TextSize = parent.offset();
    let mut left = Vec::new();
    let mut right = Vec::new();
    for child in node.children() {
        let range = TextRange::at(start, syntax::text_len(child));
        start = range.end();
        if !syntax::is_form_ref(child) || range == own {
            continue;
        }
        if range.end() <= own.start() {
            left.push(summary_at(index, range, child));
        } else {
            right.push(summary_at(index, range, child));
        }
    }
    (left, right)
}

/// Operations whose structural preconditions hold at `cursor`
pub fn available_operations(cursor: &Cursor) -> Vec<Operation> {
    let mut ops = Vec::new();
    let tag = cursor.tag();
    let nested = !cursor.is_root();
    // reader-prefix parents hold a fixed number of forms
    let resizable = nested && !cursor.parent_kind().is_some_and(SyntaxKind::is_prefix_form);

    if nested {
        ops.push(Operation::Replace);
        if resizable {
            ops.extend([
                Operation::InsertBefore,
                Operation::InsertAfter,
                Operation::Remove,
            ]);
        }
        ops.push(Operation::WrapAround);
        if cursor.value().is_some() {
            ops.push(Operation::Edit);
        }
    }
    if nested && cursor.is_collection() {
        if resizable {
            ops.push(Operation::Splice);
            if cursor.has_right_sibling() {
                ops.push(Operation::SlurpForward);
            }
            if cursor.has_left_sibling() {
                ops.push(Operation::SlurpBackward);
            }
        }
        if cursor.has_children() {
            if resizable {
                ops.extend([Operation::BarfForward, Operation::BarfBackward]);
            }
            ops.push(Operation::Unwrap);
        }
    }
    match tag {
        NodeTag::Map => ops.extend([Operation::Assoc, Operation::Dissoc, Operation::Get]),
        NodeTag::Vector => ops.push(Operation::AppendChild),
        _ => {}
    }
    if nested
        && matches!(
            tag,
            NodeTag::List | NodeTag::Vector | NodeTag::Set | NodeTag::Map
        )
    {
        ops.push(Operation::TransformCollectionType);
    }
    ops
}
