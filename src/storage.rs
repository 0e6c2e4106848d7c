//! Pluggable storage backends for persisting the dashboard snapshot.
//!
//! Persistence follows the source system's model: the complete
//! [`Snapshot`] is serialized and written as a single document under a
//! fixed key, synchronously, after every mutation — last write wins.
//! The calculators never touch storage; the dashboard shell owns the
//! save/load cycle.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;
use crate::models::Snapshot;

/// Blocking storage backend holding one whole-snapshot document.
///
/// All methods take `&self` — implementations use interior mutability
/// (e.g. `Mutex`) for thread-safe mutation.
pub trait Storage: core::fmt::Debug + Send + Sync {
    /// Loads the persisted snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read or the stored
    /// document fails to deserialize.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Persists the whole snapshot, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Removes the persisted document, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to delete.
    fn clear(&self) -> Result<()>;
}
