//! File-backed credential store adapter.
//!
//! Persists credentials as a flat string-to-string JSON map at
//! `~/.stafflink/credentials.json`, surviving process restarts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::traits::CredentialStore;

/// The credentials directory name under the home directory.
const CREDENTIALS_DIR: &str = ".stafflink";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Durable credential storage backed by a JSON file.
///
/// Reads return defaults on any problem (missing file, unreadable
/// JSON); write failures are logged and swallowed — per the store
/// contract, these operations never raise.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        })
    }

    /// Create a store at a custom path (tests, alternate profiles).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    fn write_entries(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(error = %err, path = %parent.display(), "failed to create credentials directory");
                    return;
                }
            }
        }

        let contents = match serde_json::to_string_pretty(entries) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(error = %err, "failed to serialize credentials");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, contents) {
            warn!(error = %err, path = %self.path.display(), "failed to write credentials file");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries);
        }
    }
}
