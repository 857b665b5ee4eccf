//! In-process session storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use backoffice_core::{Result, SessionStore, StorageKey};

/// Session tokens held in memory; gone when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        // A panic elsewhere cannot leave a half-written token behind.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.entries().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries().remove(&key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries().clear();
        Ok(())
    }
}
