//! The opaque durable key-value store the shop persists into.
//!
//! The store treats the gateway as fire-and-forget: writes happen after each
//! successful in-memory commit and a failed write never rolls the commit
//! back. The storage medium itself (file, browser storage, embedded db) is
//! out of scope here.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;
use thiserror::Error;

/// The four top-level collections the shop persists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Customers,
    Invoices,
    Products,
    Settings,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Customers => "customers",
            StorageKey::Invoices => "invoices",
            StorageKey::Products => "products",
            StorageKey::Settings => "settings",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable key-value gateway.
///
/// `get` returns `None` for a missing key; the caller supplies the default.
pub trait StorageGateway: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<JsonValue>;

    fn put(&self, key: StorageKey, value: JsonValue) -> Result<(), StorageError>;
}

/// In-memory gateway for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    inner: RwLock<HashMap<StorageKey, JsonValue>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageGateway for InMemoryGateway {
    fn get(&self, key: StorageKey) -> Option<JsonValue> {
        let map = self.inner.read().ok()?;
        map.get(&key).cloned()
    }

    fn put(&self, key: StorageKey, value: JsonValue) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        map.insert(key, value);
        Ok(())
    }
}
