//! Credential store trait abstraction.
//!
//! Provides a trait-based abstraction for durable token/user storage,
//! enabling dependency injection and mocking in tests.

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Storage key for the cached user record (JSON-serialized).
pub const CURRENT_USER_KEY: &str = "current_user";

/// Trait for durable key-value credential storage.
///
/// All operations are synchronous and idempotent. A missing key is a
/// normal, expected state (logged out) and never an error. The
/// [`TokenManager`](crate::auth::TokenManager) is the only component
/// that mutates the store; everything else holds at most a transient
/// copy of a value for the duration of one request.
///
/// Implementations include the production file-backed store and an
/// in-memory store for tests.
pub trait CredentialStore: Send + Sync {
    /// Read a value. Returns `None` when the key has never been set or
    /// was removed.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}
