//! In-memory credential store for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::traits::CredentialStore;

/// Credential store backed by a plain in-memory map.
///
/// Useful in tests and in ephemeral contexts where nothing should
/// survive the process.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryCredentialStore::new();
        assert!(store.is_empty());
        assert!(store.get("access_token").is_none());

        store.set("access_token", "tok");
        assert_eq!(store.get("access_token").as_deref(), Some("tok"));
        assert!(!store.is_empty());

        store.remove("access_token");
        assert!(store.get("access_token").is_none());

        // Idempotent remove
        store.remove("access_token");
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let store = InMemoryCredentialStore::new();
        store.set("k", "v1");
        store.set("k", "v2");
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }
}
