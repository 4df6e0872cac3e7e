//! Map edits and collection-type transforms.
//!
//! Map entries are consecutive pairs of forms among a map's children; trivia
//! between them is ignored when pairing and preserved when editing.

use super::CollectionTarget;
use super::cursor::{Cursor, splice};
use super::edit::{lost_focus, removal_range};
use crate::error::{EditError, Result};
use crate::parser::SyntaxKind;
use crate::syntax::{self, GreenElement, NodeTag, Value};
use rowan::{GreenNode, GreenNodeData, NodeOrToken};

/// Child indices of one map entry
#[derive(Debug, Clone, Copy)]
struct Entry {
    key: usize,
    value: usize,
}

impl Cursor {
    /// Move to the value stored under `key` in the focused map
    pub fn get(&self, key: &Value) -> Result<Cursor> {
        let map = self.map()?;
        let entry = find_entry(map, key)?
            .ok_or_else(|| EditError::not_found(format!("key {key} is not in the map")))?;
        self.child_at(entry.value).ok_or_else(lost_focus)
    }

    /// Set `key` to `value` in the focused map. An existing entry keeps its
    /// position; a new one is appended. The cursor stays on the map.
    pub fn assoc(&self, key: GreenElement, value: GreenElement, sep: &str) -> Result<Cursor> {
        let map = self.map()?;
        let key_value = syntax::sexpr(syntax::as_ref(&key))
            .ok_or_else(|| EditError::parse(format!("map key {} has no value", syntax::text_of(&key))))?;

        let updated = match find_entry(map, &key_value)? {
            Some(entry) => splice(map, entry.value..entry.value + 1, vec![value]),
            None => {
                let children = syntax::children_of(map);
                let close = children.len().saturating_sub(1);
                let last_form = children[..close].iter().rposition(syntax::is_form);
                let mut items = Vec::with_capacity(4);
                let at = match last_form {
                    Some(i) => {
                        items.push(syntax::whitespace(sep));
                        i + 1
                    }
                    None => 1,
                };
                items.extend([key, syntax::whitespace(" "), value]);
                splice(map, at..at, items)
            }
        };
        self.replace(NodeOrToken::Node(updated))
    }

    /// Remove `key` and its value from the focused map. An absent key leaves
    /// the map unchanged.
    pub fn dissoc(&self, key: &Value) -> Result<Cursor> {
        let map = self.map()?;
        let Some(entry) = find_entry(map, key)? else {
            return Ok(self.clone());
        };
        let children = syntax::children_of(map);
        // never widen over the delimiters
        let inner = &children[1..children.len() - 1];
        let (start, end) = removal_range(inner, entry.key - 1, entry.value);
        let updated = splice(map, start + 1..end + 1, Vec::new());
        self.replace(NodeOrToken::Node(updated))
    }

    /// Re-print the focused collection as another collection type. Maps turn
    /// into a sequence of `[k v]` vectors, sets drop duplicates. Layout and
    /// comments inside the collection are not kept.
    pub fn transform_collection(&self, target: CollectionTarget) -> Result<Cursor> {
        let tag = self.tag();
        if !matches!(
            tag,
            NodeTag::List | NodeTag::Vector | NodeTag::Set | NodeTag::Map
        ) {
            return Err(EditError::wrong_kind("list, vector, set or map", tag));
        }
        let elements = self
            .value()
            .and_then(|value| value.elements())
            .ok_or_else(|| EditError::wrong_kind("list, vector, set or map", tag))?;

        let converted = match target {
            CollectionTarget::Vector => Value::Vector(elements),
            CollectionTarget::List => Value::List(elements),
            CollectionTarget::Set => {
                let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
                for element in elements {
                    if !unique.contains(&element) {
                        unique.push(element);
                    }
                }
                Value::Set(unique)
            }
        };
        let element = syntax::element_from_value(&converted).map_err(EditError::parse)?;
        self.replace(element)
    }

    fn map(&self) -> Result<&GreenNode> {
        match self.node() {
            Some(node) if self.kind() == SyntaxKind::MAP => Ok(node),
            _ => Err(EditError::wrong_kind("map", self.tag())),
        }
    }
}

fn entries(map: &GreenNodeData) -> Result<Vec<Entry>> {
    let forms: Vec<usize> = map
        .children()
        .enumerate()
        .filter(|(_, c)| syntax::is_form_ref(*c))
        .map(|(i, _)| i)
        .collect();
    if forms.len() % 2 != 0 {
        return Err(EditError::not_applicable(
            "map has an odd number of forms",
        ));
    }
    Ok(forms
        .chunks_exact(2)
        .map(|pair| Entry {
            key: pair[0],
            value: pair[1],
        })
        .collect())
}

fn find_entry(map: &GreenNodeData, key: &Value) -> Result<Option<Entry>> {
    let children: Vec<_> = map.children().collect();
    Ok(entries(map)?
        .into_iter()
        .find(|entry| syntax::sexpr(children[entry.key]).as_ref() == Some(key)))
}
