use std::sync::Mutex;

use crate::{SellerStorage, Sellers, StorageError};

/// Configuration for [`InMemoryStorage`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorageConfig {
    /// Sellers the store starts with. Empty when not provided.
    pub sellers: Option<Sellers>,
}

/// In-memory seller storage. Data lives for the lifetime of the process.
///
/// Both `read` and `write` copy the mapping, so callers never alias the
/// internal container.
pub struct InMemoryStorage {
    db: Mutex<Sellers>,
}

impl InMemoryStorage {
    pub fn new(config: Option<InMemoryStorageConfig>) -> Self {
        let db = config.and_then(|c| c.sellers).unwrap_or_default();
        Self { db: Mutex::new(db) }
    }

    /// Store pre-seeded with the given sellers.
    pub fn with_sellers(sellers: Sellers) -> Self {
        Self::new(Some(InMemoryStorageConfig {
            sellers: Some(sellers),
        }))
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SellerStorage for InMemoryStorage {
    fn read(&self) -> Result<Sellers, StorageError> {
        let db = self
            .db
            .lock()
            .map_err(|_| StorageError::Internal("mutex poisoned".into()))?;
        Ok(db.iter().map(|(k, v)| (*k, v.clone())).collect())
    }

    fn write(&self, sellers: &Sellers) -> Result<(), StorageError> {
        let copy: Sellers = sellers.iter().map(|(k, v)| (*k, v.clone())).collect();
        let mut db = self
            .db
            .lock()
            .map_err(|_| StorageError::Internal("mutex poisoned".into()))?;
        *db = copy;
        Ok(())
    }
}
