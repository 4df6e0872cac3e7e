//! Session storage.
//!
//! The store maps session ids to independently locked sessions. The outer
//! lock is only held long enough to clone a session handle; work on a session
//! then serializes on that session's own mutex, so operations on different
//! sessions never wait on each other.

use crate::error::{EditError, Result};
use crate::zipper::Cursor;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub type SessionId = SmolStr;

/// Where a session's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    Text,
}

impl Origin {
    pub fn kind(&self) -> OriginKind {
        match self {
            Origin::File(_) => OriginKind::File,
            Origin::Text => OriginKind::Text,
        }
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Origin::File(path) => Some(path),
            Origin::Text => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginKind {
    File,
    Text,
}

/// Input for a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Text(String),
}

/// One open document and its current cursor
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub cursor: Cursor,
    pub origin: Origin,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, cursor: Cursor, origin: Origin) -> Self {
        Self {
            id: id.into(),
            cursor,
            origin,
        }
    }

    /// Rendered text of the whole document
    pub fn text(&self) -> String {
        self.cursor.root_text()
    }
}

/// Listing entry for an open session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub origin_kind: OriginKind,
    /// File path for file origins
    pub origin: Option<PathBuf>,
}

type SessionHandle = Arc<Mutex<Session>>;

/// Concurrent map of open sessions, in creation order
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<IndexMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session, replacing any session already open under its id
    pub fn insert(&self, session: Session) {
        let id = session.id.clone();
        let previous = self
            .sessions
            .write()
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        if previous.is_some() {
            debug!(session = %id, "replaced existing session");
        } else {
            debug!(session = %id, "opened session");
        }
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        // shift_remove keeps the creation order of the remaining sessions
        match self.sessions.write().shift_remove(id) {
            Some(_) => {
                debug!(session = %id, "closed session");
                Ok(())
            }
            None => Err(EditError::session_not_found(id)),
        }
    }

    fn handle(&self, id: &str) -> Result<SessionHandle> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| EditError::session_not_found(id))
    }

    /// Run a read-only operation against a session
    pub fn read<T>(&self, id: &str, f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
        let handle = self.handle(id)?;
        let session = handle.lock();
        f(&session)
    }

    /// Run an operation that computes a new cursor. The cursor is committed
    /// only when the operation succeeds.
    pub fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&Session) -> Result<(Cursor, T)>,
    ) -> Result<T> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();
        let (cursor, out) = f(&session)?;
        session.cursor = cursor;
        Ok(out)
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self.sessions.read().values().cloned().collect();
        handles
            .iter()
            .map(|handle| {
                let session = handle.lock();
                SessionSummary {
                    id: session.id.clone(),
                    origin_kind: session.origin.kind(),
                    origin: session.origin.path().map(|p| p.to_path_buf()),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
