//! Document file mechanics: load, persist and ensure-exists.
//!
//! # Responsibility
//! - Read and decode the whole backing file into a `Document`.
//! - Encode and replace the whole backing file atomically.
//! - Create an empty document when the backing file cannot be read.
//!
//! # Invariants
//! - Every load reads the full file; nothing is cached between calls.
//! - Every persist replaces the full file through a uniquely named temp file
//!   and a rename, so readers observe either the old or the new document.
//! - Symlinked paths are written through to their target.
//! - Only documents satisfying `Document::validate()` are persisted.

use std::path::PathBuf;
use thiserror::Error;

mod file;

pub(crate) use file::resolve_target;
pub use file::{ensure_document, read_document, write_document};

pub type DbResult<T> = Result<T, DbError>;

/// Failure of the document file layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The backing file (or its temp sibling) could not be read or written.
    #[error("failed to {op} `{}`: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File content is not a valid encoded document.
    #[error("failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),
    /// In-memory document could not be encoded.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
    /// Document to persist violates a structural invariant.
    #[error("invalid persisted document: {0}")]
    InvalidData(String),
}

impl DbError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
