//! Where the session file lives.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const SESSION_FILE: &str = "session.json";

/// The session file path: `explicit` if given, otherwise `session.json` in
/// the platform data directory. Parent directories are created.
pub fn session_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let dirs = ProjectDirs::from("", "", "backoffice")
                .context("Could not determine data directory")?;
            dirs.data_dir().join(SESSION_FILE)
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    Ok(path)
}
