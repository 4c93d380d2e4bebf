//! Store: typed CRUD over one JSON document file.
//!
//! # Responsibility
//! - Bind CRUD operations for users and posts to a single backing path.
//! - Run every operation as one fresh load/mutate/persist cycle.
//! - Report domain-level not-found separately from storage failures.
//!
//! # Invariants
//! - `Store::new` performs no I/O.
//! - Within one process, operations on the same backing file are serialized
//!   by a lock keyed on the resolved path, whichever `Store` value runs them.
//! - A failed mutation never reaches disk.
//! - Separate processes on the same path are not coordinated (last writer
//!   wins), but each persist is an atomic replace.

use crate::db::{self, DbError};
use crate::model::document::Document;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use thiserror::Error;

mod posts;
mod users;

pub type StoreResult<T> = Result<T, StoreError>;

static PATH_LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = Lazy::new(Default::default);

/// Error returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Loading or persisting the document failed.
    #[error(transparent)]
    Db(#[from] DbError),
    /// The operation requires a user that does not exist.
    #[error("user not found: {0}")]
    UserNotFound(String),
}

impl StoreError {
    /// Returns whether this is the domain-level not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }
}

/// CRUD client over a JSON document at a fixed path.
///
/// Cheap to clone; clones and independently created stores for the same
/// file share one in-process lock.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Binds a store to `path` without touching the file system.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty document unless the backing file is readable.
    ///
    /// Returns `true` when a new document was written. Existing readable
    /// content is never validated here; malformed content surfaces on the
    /// next load.
    pub fn ensure_initialized(&self) -> StoreResult<bool> {
        self.locked(|| db::ensure_document(&self.path).map_err(StoreError::from))
    }

    /// Loads the document and runs a read-only query against it.
    fn read<T>(
        &self,
        op: &'static str,
        query: impl FnOnce(&Document) -> StoreResult<T>,
    ) -> StoreResult<T> {
        self.locked(|| {
            let started_at = Instant::now();
            let result = db::read_document(&self.path)
                .map_err(StoreError::from)
                .and_then(|document| query(&document));
            log_outcome(op, started_at, &result);
            result
        })
    }

    /// Loads the document, applies one mutation and persists the result.
    ///
    /// Nothing is written when loading or the mutation itself fails.
    fn mutate<T>(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut Document) -> StoreResult<T>,
    ) -> StoreResult<T> {
        self.locked(|| {
            let started_at = Instant::now();
            let result = self.load_apply_persist(apply);
            log_outcome(op, started_at, &result);
            result
        })
    }

    fn load_apply_persist<T>(
        &self,
        apply: impl FnOnce(&mut Document) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut document = db::read_document(&self.path)?;
        let output = apply(&mut document)?;
        db::write_document(&self.path, &document)?;
        Ok(output)
    }

    fn locked<T>(&self, run: impl FnOnce() -> T) -> T {
        let lock = path_lock(&self.path);
        // The lock guards no data, so a poisoned lock is safe to reuse.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        run()
    }
}

fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    let key = lock_key(path);
    let mut locks = PATH_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// Canonical parent of the resolved target joined with its file name, so
/// the key is the same before and after the file exists and for every
/// symlink pointing at it.
fn lock_key(path: &Path) -> PathBuf {
    let target = db::resolve_target(path).unwrap_or_else(|_| path.to_path_buf());
    let Some(name) = target.file_name() else {
        return target;
    };
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent)
        .map(|parent| parent.join(name))
        .unwrap_or_else(|_| target.clone())
}
