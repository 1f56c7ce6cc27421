use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

use crate::account::types::{Account, AccountId};
use crate::client::types::Book;

/// Logical table holding every registered account.
pub const USERS_KEY: &str = "users";
/// Logical table holding the active session snapshot.
pub const SESSION_KEY: &str = "currentUser";

/// Key of the favorites list owned by `account_id`.
pub fn favorites_key(account_id: &str) -> String {
    format!("favorites_{}", account_id)
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("Corrupted record under '{key}': {source}")]
    Corrupted {
        key: String,
        source: serde_json::Error,
    },
    #[error("Stored value under '{0}' is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String key-value backend the stores persist through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process backend. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// On-disk backend over a sled tree.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Database removed from disk when dropped.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    // Flush before returning so callers observe a durable write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db.remove(key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

/// Typed handle over a backend. Clones share the same backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(SledStore::open(path)?)))
    }

    // Generic Helper: Put
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(value).map_err(StorageError::Serialization)?;
        debug!(key, bytes = serialized.len(), "storage write");
        self.backend.set(key, &serialized)
    }

    // Generic Helper: Get
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(data) => serde_json::from_str(&data)
                .map(Some)
                .map_err(|source| StorageError::Corrupted {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        debug!(key, "storage delete");
        self.backend.remove(key)
    }

    // --- Specific Accessors ---

    // 1. Accounts
    pub fn load_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.get(USERS_KEY)?.unwrap_or_default())
    }

    pub fn save_accounts(&self, accounts: &[Account]) -> Result<(), StorageError> {
        self.put(USERS_KEY, accounts)
    }

    // 2. Session snapshot
    pub fn load_session(&self) -> Result<Option<Account>, StorageError> {
        self.get(SESSION_KEY)
    }

    pub fn save_session(&self, account: &Account) -> Result<(), StorageError> {
        self.put(SESSION_KEY, account)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.delete(SESSION_KEY)
    }

    // 3. Favorites, one list per account
    pub fn load_favorites(&self, account_id: &AccountId) -> Result<Vec<Book>, StorageError> {
        Ok(self.get(&favorites_key(account_id))?.unwrap_or_default())
    }

    pub fn save_favorites(&self, account_id: &AccountId, books: &[Book]) -> Result<(), StorageError> {
        self.put(&favorites_key(account_id), books)
    }
}
