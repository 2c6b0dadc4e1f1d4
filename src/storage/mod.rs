//! Durable key-value storage for persisted session slots.
//!
//! DESIGN
//! ======
//! The session layer only needs `get` / `set` / `delete` over string keys,
//! so storage is a small async trait. `SqliteStorage` is the on-device
//! backend; `MemoryStorage` backs tests and supports fault injection.
//!
//! ERROR HANDLING
//! ==============
//! Every operation is fallible. Callers in the session layer catch and log
//! failures; nothing here retries.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Slot holding the raw auth token string.
pub const TOKEN_KEY: &str = "auth_token";
/// Slot holding the JSON-serialized user profile.
pub const USER_KEY: &str = "auth_user";

// =============================================================================
// ERRORS
// =============================================================================

/// Storage operation kind, reported in [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOp {
    Get,
    Set,
    Delete,
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The SQLite driver reported a failure.
    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),

    /// Schema migration failed while opening the store.
    #[error("storage migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The backend refused the operation (used by the in-memory store).
    #[error("storage unavailable: {op} {key}")]
    Unavailable { op: StorageOp, key: String },
}

// =============================================================================
// STORAGE TRAIT
// =============================================================================

/// Async string key-value store. Absence of a key is `Ok(None)`, not an error.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend read fails.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend write fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend delete fails.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
