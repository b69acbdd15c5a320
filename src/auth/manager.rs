//! Token lifecycle management.
//!
//! The [`TokenManager`] owns every mutation of the credential store:
//! persisting tokens on login, refreshing the access token, and
//! clearing the session on logout or terminal refresh failure. No
//! other component touches the store directly.
//!
//! Refresh de-duplication: all refresh attempts funnel through one
//! `tokio::sync::Mutex`. A caller that waited behind an in-flight
//! refresh re-reads the store after acquiring the gate and, when the
//! stored token changed under it, returns that token without a second
//! network call — at most one refresh request is in flight per
//! process at any instant, and concurrent callers observe the first
//! attempt's outcome.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::api::AuthApiClient;
use crate::auth::token::{self, TokenPair};
use crate::error::AuthError;
use crate::models::UserRecord;
use crate::traits::{
    CredentialStore, ACCESS_TOKEN_KEY, CURRENT_USER_KEY, REFRESH_TOKEN_KEY,
};

/// Owns the token lifecycle: expiry inspection, refresh invocation,
/// de-duplication of concurrent refreshes, and store mutation.
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    api: AuthApiClient,
    refresh_threshold_secs: i64,
    /// Serializes refresh attempts; see the module docs.
    refresh_gate: tokio::sync::Mutex<()>,
    /// Signed-in state, observable by the UI for the redirect-to-login
    /// effect. `send_if_modified` guarantees one notification per
    /// genuine transition even when several requests die at once.
    signed_in: watch::Sender<bool>,
}

impl TokenManager {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        api: AuthApiClient,
        refresh_threshold_secs: i64,
    ) -> Self {
        let initially_signed_in =
            store.get(ACCESS_TOKEN_KEY).is_some() && store.get(CURRENT_USER_KEY).is_some();
        let (signed_in, _) = watch::channel(initially_signed_in);

        Self {
            store,
            api,
            refresh_threshold_secs,
            refresh_gate: tokio::sync::Mutex::new(()),
            signed_in,
        }
    }

    /// Subscribe to the signed-in state. The receiver sees `false`
    /// exactly once per genuine session death.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.signed_in.subscribe()
    }

    /// Current access token, if any. Pure read; never fails.
    pub fn get_access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// Current refresh token, if any. Pure read; never fails.
    pub fn get_refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// The cached user record, if one is stored and parseable.
    pub fn cached_user(&self) -> Option<UserRecord> {
        let raw = self.store.get(CURRENT_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "cached user record is unreadable; ignoring it");
                None
            }
        }
    }

    /// Persist both tokens.
    pub fn set_tokens(&self, tokens: &TokenPair) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token);
    }

    /// Persist tokens and user record together and mark the session
    /// signed in. Called once per successful login.
    pub fn begin_session(&self, tokens: &TokenPair, user: &UserRecord) {
        self.set_tokens(tokens);
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(CURRENT_USER_KEY, &raw),
            Err(err) => warn!(error = %err, "failed to serialize user record"),
        }
        self.signed_in.send_if_modified(|signed| {
            if *signed {
                false
            } else {
                *signed = true;
                true
            }
        });
    }

    /// Remove access token, refresh token, and cached user. The only
    /// path that fully logs a session out at the storage level.
    ///
    /// Idempotent: callers racing into this observe the same cleared
    /// state, and subscribers are notified of at most one transition.
    pub fn clear_session(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(CURRENT_USER_KEY);

        let transitioned = self.signed_in.send_if_modified(|signed| {
            if *signed {
                *signed = false;
                true
            } else {
                false
            }
        });
        if transitioned {
            info!("session cleared; sign-in required");
        }
    }

    /// Whether an access token is due for refresh.
    ///
    /// True when the embedded expiry is within the configured
    /// threshold of now, or when the token cannot be decoded at all.
    /// Never fails.
    pub fn is_expired(&self, access_token: &str) -> bool {
        token::expires_within(access_token, self.refresh_threshold_secs)
    }

    /// Obtain a fresh access token, de-duplicating concurrent calls.
    ///
    /// Callers that arrive while a refresh is in flight wait on the
    /// gate and then pick up the token that refresh stored, rather
    /// than starting a second network call. A caller whose stored
    /// token is unchanged always goes to the network: a 401 can mean
    /// the server revoked a token whose embedded expiry still looks
    /// fine, so freshness alone is not proof that a refresh happened.
    ///
    /// On success the new token (and a rotated refresh token, when the
    /// server sends one) is persisted before being returned. On any
    /// failure the session is cleared and the caller gets
    /// `AuthenticationExpired` — the session is over, not retryable.
    pub async fn refresh_access_token(&self) -> Result<String, AuthError> {
        let observed = self.get_access_token();
        let _guard = self.refresh_gate.lock().await;

        // A concurrent caller may have completed the refresh while we
        // waited on the gate: the stored token is no longer the one we
        // came in with.
        let current = self.get_access_token();
        if current != observed {
            if let Some(token) = current {
                if !self.is_expired(&token) {
                    debug!("access token refreshed by a concurrent caller");
                    return Ok(token);
                }
            }
        }

        let Some(refresh_token) = self.get_refresh_token() else {
            self.clear_session();
            return Err(AuthError::AuthenticationExpired {
                message: "no refresh token available".to_string(),
            });
        };

        match self.api.refresh(&refresh_token).await {
            Ok(response) => {
                self.store.set(ACCESS_TOKEN_KEY, &response.access_token);
                if let Some(rotated) = &response.refresh_token {
                    self.store.set(REFRESH_TOKEN_KEY, rotated);
                }
                info!("access token refreshed");
                Ok(response.access_token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; clearing session");
                self.clear_session();
                Err(AuthError::AuthenticationExpired {
                    message: err.to_string(),
                })
            }
        }
    }

    /// Refresh only when the stored token is due. Returns whether a
    /// refresh happened. Used by the background refresh loop.
    pub async fn refresh_if_due(&self) -> Result<bool, AuthError> {
        match self.get_access_token() {
            Some(current) if self.is_expired(&current) => {
                self.refresh_access_token().await.map(|_| true)
            }
            _ => Ok(false),
        }
    }
}
