//! Error types for editor operations.

use crate::syntax::NodeTag;
use serde::Serialize;
use smol_str::SmolStr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during session, navigation and edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// No open session under this id.
    #[error("Session not found: {0}")]
    SessionNotFound(SmolStr),

    /// Source or content text could not be parsed.
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// A directional move ran out of tree.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A search or path resolution found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The current node has the wrong structural kind for this operation.
    #[error("Wrong node kind: expected {expected}, found {found}")]
    WrongNodeKind { expected: &'static str, found: NodeTag },

    /// A structural precondition of the operation does not hold.
    #[error("Operation not applicable: {0}")]
    OperationNotApplicable(String),

    /// IO error during read/write.
    #[error("IO error on {}: {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Machine-readable discriminant of an [`EditError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    SessionNotFound,
    ParseFailure,
    NavigationFailed,
    NotFound,
    WrongNodeKind,
    OperationNotApplicable,
    IoFailure,
}

impl EditError {
    /// Create a session-not-found error.
    pub fn session_not_found(id: impl Into<SmolStr>) -> Self {
        Self::SessionNotFound(id.into())
    }

    /// Create a parse failure.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure(message.into())
    }

    /// Create a navigation failure.
    pub fn navigation(message: impl Into<String>) -> Self {
        Self::NavigationFailed(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a wrong-node-kind error.
    pub fn wrong_kind(expected: &'static str, found: NodeTag) -> Self {
        Self::WrongNodeKind { expected, found }
    }

    /// Create an operation-not-applicable error.
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::OperationNotApplicable(message.into())
    }

    /// Create an IO failure for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionNotFound(_) => ErrorKind::SessionNotFound,
            Self::ParseFailure(_) => ErrorKind::ParseFailure,
            Self::NavigationFailed(_) => ErrorKind::NavigationFailed,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::WrongNodeKind { .. } => ErrorKind::WrongNodeKind,
            Self::OperationNotApplicable(_) => ErrorKind::OperationNotApplicable,
            Self::IoFailure { .. } => ErrorKind::IoFailure,
        }
    }
}

pub type Result<T, E = EditError> = std::result::Result<T, E>;
