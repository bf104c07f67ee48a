use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;

use notebook_core::Timestamp;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("page directory unavailable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the directory exists; create it and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::Directory(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::Directory(e.to_string()))
}

/// Replaces `target` with `content` through a temp file in the same directory, so readers
/// never observe a half-written page. Returns the new modification time.
pub fn write_atomic(target: &Path, content: &str) -> Result<Timestamp, PersistError> {
    let dir = target
        .parent()
        .ok_or_else(|| PersistError::Directory(format!("{} has no parent", target.display())))?;
    ensure_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(modified_ms(&fs::metadata(target)?)?)
}

/// Removes `target`; a missing file counts as removed.
pub fn remove_if_exists(target: &Path) -> Result<(), PersistError> {
    match fs::remove_file(target) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// File modification time in unix milliseconds.
pub fn modified_ms(meta: &fs::Metadata) -> io::Result<Timestamp> {
    let since_epoch = meta
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map_err(io::Error::other)?;
    Ok(since_epoch.as_millis() as Timestamp)
}
