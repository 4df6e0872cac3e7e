//! Uniform result envelope for hosts that talk JSON.

use crate::error::{EditError, ErrorKind};
use serde::Serialize;

/// `{ "status": "success", "result": ... }` or
/// `{ "status": "error", "error": { "kind": ..., "message": ... } }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Envelope<T> {
    Success { result: T },
    Error { error: ErrorBody },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&EditError> for ErrorBody {
    fn from(err: &EditError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl<T> From<Result<T, EditError>> for Envelope<T> {
    fn from(result: Result<T, EditError>) -> Self {
        match result {
            Ok(result) => Envelope::Success { result },
            Err(err) => Envelope::Error {
                error: ErrorBody::from(&err),
            },
        }
    }
}
