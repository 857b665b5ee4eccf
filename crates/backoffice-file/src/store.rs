//! File-backed session storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument};

use backoffice_core::Result;
use backoffice_core::error::{Error, StorageError};
use backoffice_core::{SessionStore, StorageKey};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

type Entries = BTreeMap<String, String>;

/// Session tokens in a JSON object on disk, keyed `authToken` and
/// `refreshToken`.
///
/// Every operation takes an exclusive lock on a sibling `.lock` file, so
/// several processes can share one session file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// A store at `path`. Nothing is created until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn map_io(&self, err: std::io::Error) -> Error {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
        .into()
    }

    /// Run `f` while holding the exclusive lock.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.map_io(e))?;
            }
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.map_io(e))?;

        lock_file.lock_exclusive().map_err(|e| self.map_io(e))?;
        let result = f();
        lock_file.unlock().map_err(|e| self.map_io(e))?;
        result
    }

    fn read_entries(&self) -> Result<Entries> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.map_io(e)),
        };

        if json.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&json).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if entries.is_empty() {
            return self.remove_file();
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        let mut file = File::create(&tmp).map_err(|e| self.map_io(e))?;

        // Set restrictive permissions before any token is written (Unix only)
        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.map_io(e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms).map_err(|e| self.map_io(e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| self.map_io(e))?;
        file.sync_data().map_err(|e| self.map_io(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.map_io(e))?;
        Ok(())
    }

    fn remove_file(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.map_io(e)),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        self.locked(|| Ok(self.read_entries()?.remove(key.as_str())))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.locked(|| {
            let mut entries = self.read_entries()?;
            entries.insert(key.as_str().to_string(), value.to_string());
            self.write_entries(&entries)
        })?;
        debug!(%key, "Stored session value");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: StorageKey) -> Result<()> {
        self.locked(|| {
            let mut entries = self.read_entries()?;
            if entries.remove(key.as_str()).is_some() {
                self.write_entries(&entries)?;
            }
            Ok(())
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        self.locked(|| self.remove_file())?;
        debug!("Session file removed");
        Ok(())
    }
}
