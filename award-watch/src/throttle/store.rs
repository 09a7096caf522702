//! Durable marker storage with exclusive locks.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::trace;

use super::error::ThrottleError;

/// One independently locked piece of throttle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Set once a startup notice has gone out.
    Startup,
    /// Day the last "no flights" digest went out.
    Daily,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Startup => "startup",
            Slot::Daily => "daily",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyed state with a non-blocking exclusive lock per key.
///
/// Locks must exclude other processes, not just other threads. A lock is
/// held for as long as its guard lives.
pub trait MarkerStore {
    type Guard;

    /// Try to take the slot's lock without waiting.
    ///
    /// Returns `Ok(None)` when someone else holds it.
    fn try_lock(&self, slot: Slot) -> Result<Option<Self::Guard>, ThrottleError>;

    /// Read the slot's value, `None` if it has never been written.
    fn read(&self, slot: Slot) -> Result<Option<String>, ThrottleError>;

    /// Replace the slot's value.
    fn write(&self, slot: Slot, value: &str) -> Result<(), ThrottleError>;
}

/// Marker store backed by files in a directory.
///
/// Each slot has a lock file, locked with an OS advisory lock, and a
/// marker file holding its value. Processes sharing the directory share
/// the state.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    dir: PathBuf,
}

impl FileMarkerStore {
    /// Create a store rooted at `dir`. The directory is created on first lock.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn lock_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.lock", slot.name()))
    }

    fn marker_path(&self, slot: Slot) -> PathBuf {
        match slot {
            Slot::Startup => self.dir.join("startup.sent"),
            Slot::Daily => self.dir.join("daily.last"),
        }
    }
}

/// An advisory lock on a slot's lock file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Closing the file releases the lock as well.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

impl MarkerStore for FileMarkerStore {
    type Guard = FileLock;

    fn try_lock(&self, slot: Slot) -> Result<Option<FileLock>, ThrottleError> {
        let io = |source| ThrottleError::Io { slot, source };

        fs::create_dir_all(&self.dir).map_err(io)?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path(slot))
            .map_err(io)?;

        match fs2::FileExt::try_lock_exclusive(&file) {
            Ok(()) => {
                trace!(%slot, "lock acquired");
                Ok(Some(FileLock { file }))
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                trace!(%slot, "lock held elsewhere");
                Ok(None)
            }
            Err(e) => Err(io(e)),
        }
    }

    fn read(&self, slot: Slot) -> Result<Option<String>, ThrottleError> {
        match fs::read_to_string(self.marker_path(slot)) {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ThrottleError::Io { slot, source }),
        }
    }

    /// Replace the marker atomically: readers see the old value or the new
    /// one, never a truncated file.
    fn write(&self, slot: Slot, value: &str) -> Result<(), ThrottleError> {
        let io = |source| ThrottleError::Io { slot, source };

        fs::create_dir_all(&self.dir).map_err(io)?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io)?;
        tmp.write_all(value.as_bytes()).map_err(io)?;
        tmp.as_file().sync_all().map_err(io)?;
        tmp.persist(self.marker_path(slot)).map_err(|e| io(e.error))?;
        Ok(())
    }
}
