//! Durable session storage.

use std::fmt;

use crate::Result;

/// The fixed keys the session lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AuthToken,
    RefreshToken,
}

impl StorageKey {
    pub const ALL: [StorageKey; 2] = [StorageKey::AuthToken, StorageKey::RefreshToken];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AuthToken => "authToken",
            StorageKey::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide key-value storage for session tokens.
///
/// Injected into the transport (read-only use) and the auth service (the
/// only writer).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    fn remove(&self, key: StorageKey) -> Result<()>;

    /// Remove every session key.
    fn clear(&self) -> Result<()> {
        for key in StorageKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_fixed_names() {
        assert_eq!(StorageKey::AuthToken.as_str(), "authToken");
        assert_eq!(StorageKey::RefreshToken.to_string(), "refreshToken");
    }
}
