//! Whole-file read and atomic replace of the JSON document.

use super::{DbError, DbResult};
use crate::model::document::Document;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::{Builder, NamedTempFile};

const TEMP_PREFIX: &str = ".postdb-";
const TEMP_SUFFIX: &str = ".tmp";
const MAX_SYMLINK_HOPS: usize = 32;

/// Reads and decodes the document stored at `path`.
///
/// Key/identity divergence is tolerated here so that reads and deletes keep
/// working on such documents; `write_document` refuses to persist it.
///
/// # Errors
/// - `DbError::Io` when the file cannot be read (including when it is missing).
/// - `DbError::Decode` when the content is not a well-formed document.
pub fn read_document(path: &Path) -> DbResult<Document> {
    let bytes = fs::read(path).map_err(|err| DbError::io("read", path, err))?;
    let document: Document = serde_json::from_slice(&bytes).map_err(DbError::Decode)?;

    debug!(
        "event=document_load module=db status=ok bytes={} users={} posts={}",
        bytes.len(),
        document.users.len(),
        document.posts.len()
    );
    Ok(document)
}

/// Encodes `document` and atomically replaces the file at `path`.
///
/// Symlinks are followed so the link's target is replaced, not the link.
/// The payload goes to a uniquely named temp file next to the target, which
/// inherits the target's permissions, is fsynced, then renamed over it. On
/// failure the temp file is removed and the target is left in place.
///
/// # Errors
/// - `DbError::InvalidData` when a map key diverges from its record identity.
/// - `DbError::Encode` when serialization fails.
/// - `DbError::Io` when resolving, writing, syncing or renaming fails.
pub fn write_document(path: &Path, document: &Document) -> DbResult<()> {
    document.validate().map_err(DbError::InvalidData)?;
    let payload = serde_json::to_vec(document).map_err(DbError::Encode)?;

    let target = resolve_target(path)?;
    let temp = write_temp(&target, &payload)?;
    temp.persist(&target)
        .map_err(|err| DbError::io("replace", &target, err.error))?;

    sync_dir(parent_dir(&target));

    debug!(
        "event=document_persist module=db status=ok bytes={} users={} posts={}",
        payload.len(),
        document.users.len(),
        document.posts.len()
    );
    Ok(())
}

/// Makes sure a document file exists at `path`.
///
/// Returns `true` when a new empty document was written. Any read failure,
/// not only a missing file, triggers creation and overwrites whatever is at
/// `path`. Readable content is left untouched and is not validated.
pub fn ensure_document(path: &Path) -> DbResult<bool> {
    let started_at = Instant::now();

    if fs::read(path).is_ok() {
        debug!("event=document_ensure module=db status=ok created=false");
        return Ok(false);
    }

    match write_document(path, &Document::empty()) {
        Ok(()) => {
            info!(
                "event=document_ensure module=db status=ok created=true duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(true)
        }
        Err(err) => {
            error!(
                "event=document_ensure module=db status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Follows symlinks at `path`, including dangling ones, to the file to replace.
pub(crate) fn resolve_target(path: &Path) -> DbResult<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&current)
                    .map_err(|err| DbError::io("resolve", &current, err))?;
                current = parent_dir(&current).join(link);
            }
            _ => return Ok(current),
        }
    }
    Err(DbError::io(
        "resolve",
        path,
        std::io::Error::other("too many levels of symbolic links"),
    ))
}

fn write_temp(target: &Path, payload: &[u8]) -> DbResult<NamedTempFile> {
    let dir = parent_dir(target);
    let mut temp = Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|err| DbError::io("create temp file in", dir, err))?;

    if let Ok(meta) = fs::metadata(target) {
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|err| DbError::io("set permissions on", temp.path(), err))?;
    }
    temp.write_all(payload)
        .map_err(|err| DbError::io("write", temp.path(), err))?;
    temp.as_file()
        .sync_all()
        .map_err(|err| DbError::io("sync", temp.path(), err))?;
    Ok(temp)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// Best effort: directories cannot be opened for sync on every platform.
fn sync_dir(dir: &Path) {
    if let Ok(dir) = File::open(dir) {
        let _ = dir.sync_all();
    }
}
