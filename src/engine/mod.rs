//! Session-scoped editing engine.
//!
//! [`Editor`] is the entry point: it owns the [`SessionStore`] and exposes
//! every navigation, search, mutation and bulk operation by session id. Each
//! operation reads the session's cursor, computes a new one and commits it
//! only on success, so a failed call leaves the session exactly as it was.
//!
//! ## Quick start
//!
//! ```ignore
//! use zipedit::engine::{Editor, Source};
//! use zipedit::zipper::Direction;
//!
//! let editor = Editor::new();
//! editor.create_session("s1", Source::Text("(defn add [a b] (+ a b))".into()))?;
//! editor.navigate("s1", Direction::Down, 1)?;
//! editor.insert_after("s1", "^:private")?;
//! println!("{}", editor.document_text("s1")?);
//! ```

mod bulk;
mod envelope;
mod info;
mod search;
mod store;

pub use bulk::{BulkKind, BulkOperation};
pub use envelope::{Envelope, ErrorBody};
pub use info::{NodeInfo, NodeSummary, Operation, ZipperInfo, available_operations};
pub use search::{DefinitionHeads, SymbolMatch};
pub use store::{Origin, OriginKind, Session, SessionId, SessionStore, SessionSummary, Source};

use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::parser::{SyntaxKind, parse, parse_form};
use crate::syntax::{self, GreenElement, Value};
use crate::zipper::{CollectionTarget, Cursor, Direction, Path, SearchDirection, WrapperKind};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Result of saving a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Saved {
    /// Written to disk
    File { path: PathBuf, text: String },
    /// Text origin without a target; nothing was written
    Text { text: String },
}

impl Saved {
    pub fn text(&self) -> &str {
        match self {
            Saved::File { text, .. } | Saved::Text { text } => text,
        }
    }
}

/// Result of [`Editor::remove`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Removed {
    /// Semantic value of the removed node, if it had one
    pub value: Option<Value>,
    pub info: ZipperInfo,
}

/// Result of a bulk operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkOutcome {
    /// Items attempted, or replacements made for find-and-replace
    pub count: usize,
    pub info: ZipperInfo,
}

/// Multi-session structural editor
#[derive(Debug)]
pub struct Editor {
    store: SessionStore,
    config: EditorConfig,
    heads: DefinitionHeads,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            store: SessionStore::new(),
            heads: DefinitionHeads::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Parse a document and open a session on it. The cursor starts on the
    /// first top-level form. An id already in use is replaced.
    pub fn create_session(&self, id: impl Into<SessionId>, source: Source) -> Result<ZipperInfo> {
        let (text, origin) = match source {
            Source::File(path) => {
                let text = std::fs::read_to_string(&path).map_err(|e| EditError::io(&path, e))?;
                (text, Origin::File(path))
            }
            Source::Text(text) => (text, Origin::Text),
        };
        let parsed = parse(&text);
        if !parsed.ok() {
            return Err(EditError::parse(parsed.error_summary()));
        }
        let cursor = Cursor::start(parsed.green);
        let info = ZipperInfo::of(&cursor);
        self.store.insert(Session::new(id, cursor, origin));
        Ok(info)
    }

    pub fn close_session(&self, id: &str) -> Result<()> {
        self.store.remove(id)
    }

    /// Open sessions in creation order
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store.summaries()
    }

    /// Snapshot of a session
    pub fn session(&self, id: &str) -> Result<Session> {
        self.store.read(id, |session| Ok(session.clone()))
    }

    pub fn zipper_info(&self, id: &str) -> Result<ZipperInfo> {
        self.store.read(id, |session| Ok(ZipperInfo::of(&session.cursor)))
    }

    pub fn node_info(&self, id: &str) -> Result<NodeInfo> {
        self.store.read(id, |session| Ok(NodeInfo::of(&session.cursor)))
    }

    /// Rendered text of the whole document
    pub fn document_text(&self, id: &str) -> Result<String> {
        self.store.read(id, |session| Ok(session.text()))
    }

    /// Render the document and write it to `target`, or to the file the
    /// session was opened from. Text sessions without a target only return
    /// their text.
    pub fn save(&self, id: &str, target: Option<&std::path::Path>) -> Result<Saved> {
        self.store.read(id, |session| {
            let text = session.text();
            let path = match (target, &session.origin) {
                (Some(path), _) => path.to_path_buf(),
                (None, Origin::File(path)) => path.clone(),
                (None, Origin::Text) => return Ok(Saved::Text { text }),
            };
            std::fs::write(&path, &text).map_err(|e| EditError::io(&path, e))?;
            debug!(session = %session.id, path = %path.display(), "saved session");
            Ok(Saved::File { path, text })
        })
    }

    // ========================================================================
    // Navigation and search
    // ========================================================================

    /// Move `steps` times in `direction`. Either every step succeeds or the
    /// cursor does not move.
    pub fn navigate(&self, id: &str, direction: Direction, steps: usize) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| {
            let mut current = cursor.clone();
            for step in 1..=steps {
                current = direction.apply(&current).ok_or_else(|| {
                    EditError::navigation(format!(
                        "cannot move {direction} from {} (step {step} of {steps})",
                        current.tag()
                    ))
                })?;
            }
            trace!(%direction, steps, "navigated");
            Ok(current)
        })
    }

    pub fn navigate_to_path(&self, id: &str, path: &Path) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| path.resolve(&cursor.root()))
    }

    pub fn find_value(
        &self,
        id: &str,
        direction: SearchDirection,
        value: &Value,
    ) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| {
            search::find_value(cursor, direction, value)
                .ok_or_else(|| EditError::not_found(format!("no {direction:?} node equal to {value}")))
        })
    }

    pub fn find_by_predicate(
        &self,
        id: &str,
        direction: SearchDirection,
        predicate: impl Fn(&Cursor) -> bool,
    ) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| {
            search::find_by_predicate(cursor, direction, predicate)
                .ok_or_else(|| EditError::not_found("no node matches the predicate"))
        })
    }

    pub fn find_by_symbol(&self, id: &str, name: &str, matching: SymbolMatch) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| {
            search::find_by_symbol(&cursor.root(), name, matching)
                .ok_or_else(|| EditError::not_found(format!("symbol {name}")))
        })
    }

    pub fn find_function_definition(&self, id: &str, name: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            search::find_function_definition(&cursor.root(), &editor.heads, name)
                .ok_or_else(|| EditError::not_found(format!("definition of {name}")))
        })
    }

    pub fn find_next_function(&self, id: &str) -> Result<ZipperInfo> {
        self.find_function(id, SearchDirection::Next)
    }

    pub fn find_prev_function(&self, id: &str) -> Result<ZipperInfo> {
        self.find_function(id, SearchDirection::Prev)
    }

    fn find_function(&self, id: &str, direction: SearchDirection) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            search::find_function(cursor, &editor.heads, direction)
                .ok_or_else(|| EditError::not_found(format!("no {direction:?} definition form")))
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replace the current node with `content`, which must be a single form
    pub fn replace(&self, id: &str, content: &str) -> Result<ZipperInfo> {
        let form = read_form(content)?;
        self.move_to(id, |cursor, _| cursor.replace(form))
    }

    /// Replace the current node with `f` applied to its semantic value
    pub fn edit(&self, id: &str, f: impl FnOnce(Value) -> Value) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| {
            let value = cursor
                .value()
                .ok_or_else(|| EditError::wrong_kind("form with a value", cursor.tag()))?;
            let edited = syntax::element_from_value(&f(value)).map_err(EditError::parse)?;
            cursor.replace(edited)
        })
    }

    pub fn insert_before(&self, id: &str, content: &str) -> Result<ZipperInfo> {
        let form = read_form(content)?;
        self.move_to(id, |cursor, editor| {
            cursor.insert_left(form, editor.separator(cursor))
        })
    }

    pub fn insert_after(&self, id: &str, content: &str) -> Result<ZipperInfo> {
        let form = read_form(content)?;
        self.move_to(id, |cursor, editor| {
            cursor.insert_right(form, editor.separator(cursor))
        })
    }

    /// Remove the current node; returns its value alongside the new position
    pub fn remove(&self, id: &str) -> Result<Removed> {
        self.store.update(id, |session| {
            let value = session.cursor.value();
            let cursor = session.cursor.remove()?;
            let info = ZipperInfo::of(&cursor);
            Ok((cursor, Removed { value, info }))
        })
    }

    pub fn slurp_forward(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            cursor.slurp_forward(&editor.config.sibling_separator)
        })
    }

    pub fn slurp_backward(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            cursor.slurp_backward(&editor.config.sibling_separator)
        })
    }

    pub fn barf_forward(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            cursor.barf_forward(editor.separator(cursor))
        })
    }

    pub fn barf_backward(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, editor| {
            cursor.barf_backward(editor.separator(cursor))
        })
    }

    pub fn wrap_around(&self, id: &str, kind: WrapperKind) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| cursor.wrap(kind))
    }

    pub fn splice(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| cursor.splice())
    }

    /// Replace the current collection with its first child; other children
    /// are dropped
    pub fn unwrap(&self, id: &str) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| cursor.unwrap())
    }

    /// Set `key` to `value` in the current map
    pub fn assoc(&self, id: &str, key: &str, value: &str) -> Result<ZipperInfo> {
        let key = read_form(key)?;
        let value = read_form(value)?;
        self.move_to(id, |cursor, editor| {
            cursor.assoc(key, value, &editor.config.sibling_separator)
        })
    }

    pub fn dissoc(&self, id: &str, key: &str) -> Result<ZipperInfo> {
        let key = read_value(key)?;
        self.move_to(id, |cursor, _| cursor.dissoc(&key))
    }

    /// Move to the value under `key` in the current map
    pub fn get(&self, id: &str, key: &str) -> Result<ZipperInfo> {
        let key = read_value(key)?;
        self.move_to(id, |cursor, _| cursor.get(&key))
    }

    /// Append `content` to the current vector
    pub fn append_child(&self, id: &str, content: &str) -> Result<ZipperInfo> {
        let form = read_form(content)?;
        self.move_to(id, |cursor, editor| {
            if cursor.kind() != SyntaxKind::VECTOR {
                return Err(EditError::wrong_kind("vector", cursor.tag()));
            }
            cursor.append_child(form, &editor.config.sibling_separator)
        })
    }

    pub fn transform_collection_type(
        &self,
        id: &str,
        target: CollectionTarget,
    ) -> Result<ZipperInfo> {
        self.move_to(id, |cursor, _| cursor.transform_collection(target))
    }

    // ========================================================================
    // Bulk
    // ========================================================================

    /// Apply insert/replace operations deepest path first. Items whose path
    /// does not resolve, or whose edit fails, are skipped. The cursor ends on
    /// the document start.
    pub fn bulk_insert(&self, id: &str, operations: Vec<BulkOperation>) -> Result<BulkOutcome> {
        self.bulk(id, |root, editor| {
            Ok(bulk::insert_all(root, operations, &editor.config))
        })
    }

    pub fn bulk_wrap(&self, id: &str, paths: Vec<Path>, kind: WrapperKind) -> Result<BulkOutcome> {
        self.bulk(id, |root, _| Ok(bulk::wrap_all(root, paths, kind)))
    }

    /// Token-level substitution of `target` by `replacement`, bounded by the
    /// configured iteration cap. `count` is the number of replacements.
    pub fn bulk_find_and_replace(
        &self,
        id: &str,
        target: &str,
        replacement: &str,
    ) -> Result<BulkOutcome> {
        self.bulk(id, |root, editor| {
            bulk::find_and_replace(root, target, replacement, &editor.config)
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn move_to(
        &self,
        id: &str,
        f: impl FnOnce(&Cursor, &Editor) -> Result<Cursor>,
    ) -> Result<ZipperInfo> {
        self.store.update(id, |session| {
            let cursor = f(&session.cursor, self)?;
            let info = ZipperInfo::of(&cursor);
            Ok((cursor, info))
        })
    }

    fn bulk(
        &self,
        id: &str,
        f: impl FnOnce(rowan::GreenNode, &Editor) -> Result<(rowan::GreenNode, usize)>,
    ) -> Result<BulkOutcome> {
        self.store.update(id, |session| {
            let (root, count) = f(session.cursor.root(), self)?;
            let cursor = Cursor::start(root);
            let info = ZipperInfo::of(&cursor);
            Ok((cursor, BulkOutcome { count, info }))
        })
    }

    fn separator(&self, cursor: &Cursor) -> &str {
        self.config.separator_for(cursor.parent_is_root())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_form(content: &str) -> Result<GreenElement> {
    parse_form(content).map_err(EditError::parse)
}

fn read_value(content: &str) -> Result<Value> {
    Value::read(content).map_err(EditError::parse)
}
