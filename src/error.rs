//! Error types for the Majordome domain core.

use crate::models::AccountId;

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, MajordomeError>;

/// All errors that can occur when using the Majordome domain core.
///
/// The taxonomy is deliberately narrow: the calculators are pure and
/// side-effect-free, so the only failure sources are snapshot
/// (de)serialization, the storage backend, and the one structural
/// invariant the snapshot enforces on mutation.
#[derive(Debug, thiserror::Error)]
pub enum MajordomeError {
    /// JSON serialization or deserialization of the snapshot failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed to read or write the snapshot.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A transfer named the same account as both source and destination.
    #[error("transfer source and destination are the same account ({account})")]
    SelfTransfer {
        /// The offending account identifier.
        account: AccountId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = MajordomeError::from(serde_err);
        assert!(matches!(err, MajordomeError::Serialization(_)));
        let msg = err.to_string();
        assert!(msg.contains("serialization error"));
    }

    #[test]
    fn error_storage_display() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = MajordomeError::Storage(Box::new(inner));
        let msg = err.to_string();
        assert!(msg.contains("storage error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn error_self_transfer_display() {
        let err = MajordomeError::SelfTransfer {
            account: AccountId::new(7),
        };
        let msg = err.to_string();
        assert!(msg.contains("same account"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MajordomeError>();
    }
}
