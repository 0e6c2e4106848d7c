//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation
//! of the [`super::Storage`] trait. Ideal for unit and integration tests
//! where file I/O is undesirable.

use std::sync::Mutex;

use crate::error::{MajordomeError, Result};
use crate::models::Snapshot;

/// Thread-safe in-memory storage for testing.
///
/// Holds at most one snapshot document, like the browser storage slot it
/// stands in for.
///
/// # Example
///
/// ```rust
/// use majordome_core::models::Snapshot;
/// use majordome_core::storage::{InMemoryStorage, Storage};
///
/// let storage = InMemoryStorage::new();
/// storage.save(&Snapshot::new()).unwrap();
/// assert!(storage.load().unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// The stored document behind a mutex for interior mutability.
    inner: Mutex<Option<Snapshot>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Option<Snapshot>) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> MajordomeError {
    MajordomeError::Storage(err.to_string().into())
}

impl super::Storage for InMemoryStorage {
    #[inline]
    fn load(&self) -> Result<Option<Snapshot>> {
        self.with_lock(|slot| slot.clone())
    }

    #[inline]
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.with_lock(|slot| *slot = Some(snapshot.clone()))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|slot| *slot = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountId, NaiveDate};
    use crate::storage::Storage;
    use rust_decimal::Decimal;

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(Account {
            id: AccountId::new(1),
            name: "Conta Corrente".to_owned(),
            currency: "BRL".to_owned(),
            initial_balance: Decimal::from(1500),
            balance_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            min_balance: Decimal::from(100),
            current_balance: Decimal::ZERO,
        });
        snapshot
    }

    #[test]
    fn empty_storage_loads_none() {
        let storage = InMemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let storage = InMemoryStorage::new();
        let snapshot = sample_snapshot();
        storage.save(&snapshot).unwrap();
        assert_eq!(storage.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn save_replaces_previous_document() {
        let storage = InMemoryStorage::new();
        storage.save(&sample_snapshot()).unwrap();
        let empty = Snapshot::new();
        storage.save(&empty).unwrap();
        assert_eq!(storage.load().unwrap(), Some(empty));
    }

    #[test]
    fn clear_removes_the_document() {
        let storage = InMemoryStorage::new();
        storage.save(&sample_snapshot()).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
