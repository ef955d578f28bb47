//! Atomic file writes and exclusive file locks.
//!
//! Every file-backed store in this crate writes through [`write_atomic`]:
//! content goes to a hidden temporary sibling, is synced, then renamed over
//! the target. Read-modify-write cycles additionally hold a [`FileLock`].

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use rath_core::RathError;

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// File locking error.
    LockError(String),
    /// Target path cannot hold a temporary sibling.
    InvalidPath(PathBuf),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
            AtomicFileError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<AtomicFileError> for RathError {
    fn from(err: AtomicFileError) -> Self {
        match err {
            AtomicFileError::IoError(e) => e.into(),
            other => RathError::storage(other.to_string()),
        }
    }
}

/// Reads a file, returning `None` if it does not exist or is blank.
pub fn read_optional(path: &Path) -> Result<Option<String>, AtomicFileError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replaces the content of `path` with `content` atomically.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), AtomicFileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content.as_bytes())?;

    // Ensure data is written to disk
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, AtomicFileError> {
    let parent = path
        .parent()
        .ok_or_else(|| AtomicFileError::InvalidPath(path.to_path_buf()))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| AtomicFileError::InvalidPath(path.to_path_buf()))?;

    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// A file lock guard that releases the lock when dropped.
///
/// The `.lock` file itself stays on disk. Every writer must lock the same
/// inode, so it is never unlinked.
pub struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock guarding `path`, waiting for other holders.
    ///
    /// Blocks the calling thread; run it under `spawn_blocking` in async code.
    pub fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;
        Ok(FileLock { file })
    }

    /// Acquires an exclusive lock guarding `path` without waiting.
    ///
    /// Fails with [`AtomicFileError::LockError`] while another writer holds it.
    pub fn try_acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let file = open_lock_file(path)?;
        file.try_lock_exclusive().map_err(|e| {
            AtomicFileError::LockError(format!("{} is locked by another writer: {}", path.display(), e))
        })?;
        Ok(FileLock { file })
    }
}

fn open_lock_file(path: &Path) -> Result<File, AtomicFileError> {
    let lock_path = path.with_extension("lock");

    if let Some(parent) = lock_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)?)
}
