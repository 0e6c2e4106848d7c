//! JSON-file-based storage backend.
//!
//! Persists the whole snapshot as one JSON document,
//! `majordome-data.json`, under a configurable directory (default:
//! `$XDG_DATA_HOME/majordome/`) — the file-system counterpart of the
//! browser storage key the dashboard originally wrote to.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{MajordomeError, Result};
use crate::models::Snapshot;

/// Application name used for the XDG data directory.
const APP_NAME: &str = "majordome";

/// Fixed name of the snapshot document.
const DATA_FILE: &str = "majordome-data.json";

/// File-backed storage that persists the snapshot as a JSON document.
///
/// Writes are atomic (write-to-tmp then rename), so a crash mid-save
/// leaves the previous document intact. Thread safety within a single
/// process is provided by an in-process [`Mutex`]; the source system is
/// single-user and single-session, so no cross-process coordination is
/// attempted.
///
/// # File layout
///
/// ```text
/// <dir>/
///   majordome-data.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Directory containing the snapshot document.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory,
    /// creating it (and parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Creates a file storage at the default XDG-compliant data
    /// directory (`$XDG_DATA_HOME/majordome/`, typically
    /// `~/.local/share/majordome/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined or created.
    #[inline]
    pub fn at_default_dir() -> Result<Self> {
        Self::new(Self::default_dir()?)
    }

    /// Returns the default XDG-compliant data directory for this
    /// application.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                MajordomeError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Full path of the snapshot document.
    fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    /// Acquires the in-process mutex guard and executes `op`.
    fn with_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        op()
    }
}

/// Wraps an I/O error into the storage error variant.
fn storage_io_error(err: std::io::Error) -> MajordomeError {
    MajordomeError::Storage(Box::new(err))
}

/// Wraps a mutex poison error.
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> MajordomeError {
    MajordomeError::Storage(err.to_string().into())
}

impl super::Storage for FileStorage {
    fn load(&self) -> Result<Option<Snapshot>> {
        self.with_lock(|| {
            let path = self.data_path();
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    let snapshot = serde_json::from_str(&contents)?;
                    tracing::debug!(path = %path.display(), "snapshot loaded");
                    Ok(Some(snapshot))
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(storage_io_error(err)),
            }
        })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.with_lock(|| {
            let path = self.data_path();
            let tmp_path = self.dir.join(format!("{DATA_FILE}.tmp"));
            let json = serde_json::to_string_pretty(snapshot)?;
            fs::write(&tmp_path, json).map_err(storage_io_error)?;
            fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
            tracing::debug!(path = %path.display(), "snapshot saved");
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.with_lock(|| {
            let path = self.data_path();
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(storage_io_error(err)),
            }
        })
    }
}
