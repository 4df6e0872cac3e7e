//! Searches over a document.
//!
//! Value and predicate searches scan from the cursor in depth-first order,
//! excluding the starting node. Symbol and definition lookups scan the whole
//! document from its root.

use crate::config::EditorConfig;
use crate::parser::SyntaxKind;
use crate::syntax::{NodeTag, Value};
use crate::zipper::{Cursor, SearchDirection};
use rowan::GreenNode;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use smol_str::SmolStr;
use tracing::trace;

/// Matching rules for [`find_by_symbol`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SymbolMatch {
    /// Only accept whole-token matches; otherwise fall back to substrings
    pub exact: bool,
    pub case_sensitive: bool,
}

impl Default for SymbolMatch {
    fn default() -> Self {
        Self {
            exact: false,
            case_sensitive: true,
        }
    }
}

impl SymbolMatch {
    pub fn exact() -> Self {
        Self {
            exact: true,
            case_sensitive: true,
        }
    }
}

/// Head symbols that make a list a definition form
#[derive(Debug, Clone, Default)]
pub struct DefinitionHeads(FxHashSet<SmolStr>);

impl DefinitionHeads {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self(config.definition_forms.iter().cloned().collect())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    /// Whether the focused node is a definition: `(defn name ...)`
    pub fn is_definition(&self, cursor: &Cursor) -> bool {
        cursor.tag() == NodeTag::List
            && cursor
                .nth_child(0)
                .and_then(|head| head.value())
                .and_then(|head| head.as_symbol().map(|s| self.contains(s)))
                .unwrap_or(false)
    }

    /// Name defined by the focused definition form. Metadata on the name
    /// (`^:private f`) is looked through.
    pub fn defined_name(&self, cursor: &Cursor) -> Option<SmolStr> {
        if !self.is_definition(cursor) {
            return None;
        }
        match cursor.nth_child(1)?.value()? {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

pub fn find_value(from: &Cursor, direction: SearchDirection, value: &Value) -> Option<Cursor> {
    find_by_predicate(from, direction, |cursor| {
        cursor.value().as_ref() == Some(value)
    })
}

pub fn find_by_predicate(
    from: &Cursor,
    direction: SearchDirection,
    predicate: impl Fn(&Cursor) -> bool,
) -> Option<Cursor> {
    let found = direction.scan(from).find(|cursor| predicate(cursor));
    trace!(?direction, found = found.is_some(), "predicate search");
    found
}

/// Symbol and keyword tokens of a document in depth-first order
fn name_tokens(root: &GreenNode) -> impl Iterator<Item = Cursor> + use<> {
    Cursor::new(root.clone())
        .successors()
        .filter(|cursor| matches!(cursor.kind(), SyntaxKind::SYMBOL | SyntaxKind::KEYWORD))
}

/// First symbol or keyword token matching `name`. An exact match ignores a
/// leading `:` on either side; without `exact`, a substring match is tried
/// when no token matches exactly.
pub fn find_by_symbol(root: &GreenNode, name: &str, matching: SymbolMatch) -> Option<Cursor> {
    let fold = |text: &str| {
        if matching.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    };
    let needle = fold(name);
    let bare_needle = needle.trim_start_matches(':').to_string();

    let exact = name_tokens(root).find(|cursor| {
        let text = fold(&cursor.text());
        text == needle || text.trim_start_matches(':') == bare_needle
    });
    if exact.is_some() || matching.exact {
        trace!(name, found = exact.is_some(), "exact symbol search");
        return exact;
    }

    let partial = name_tokens(root).find(|cursor| fold(&cursor.text()).contains(&needle));
    trace!(name, found = partial.is_some(), "substring symbol search");
    partial
}

/// First definition form in the document that defines `name`
pub fn find_function_definition(
    root: &GreenNode,
    heads: &DefinitionHeads,
    name: &str,
) -> Option<Cursor> {
    Cursor::new(root.clone())
        .successors()
        .find(|cursor| heads.defined_name(cursor).is_some_and(|n| n.as_str() == name))
}

/// Nearest definition form from the cursor in `direction`
pub fn find_function(
    from: &Cursor,
    heads: &DefinitionHeads,
    direction: SearchDirection,
) -> Option<Cursor> {
    find_by_predicate(from, direction, |cursor| heads.is_definition(cursor))
}
