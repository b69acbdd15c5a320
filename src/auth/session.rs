//! Session facade.
//!
//! [`SessionClient`] is the one type other subsystems talk to: login,
//! logout, role checks, and authenticated HTTP. Everything else in
//! this crate hangs off it. The client is constructed explicitly with
//! its transport and store (no hidden global state); create it once at
//! app boot and drop it at teardown, which also stops the background
//! refresh loop.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::auth::api::AuthApiClient;
use crate::auth::manager::TokenManager;
use crate::auth::refresh_loop::RefreshLoop;
use crate::auth::token::TokenPair;
use crate::config::SessionConfig;
use crate::error::{AuthError, ClientError};
use crate::http::HttpPipeline;
use crate::models::{Role, UserRecord};
use crate::traits::{CredentialStore, HttpClient, Request, Response};

/// The session layer's public face.
pub struct SessionClient {
    config: SessionConfig,
    tokens: Arc<TokenManager>,
    pipeline: HttpPipeline,
    api: AuthApiClient,
    refresh_loop: RefreshLoop,
}

impl SessionClient {
    /// Build a client from explicit collaborators.
    pub fn new(
        config: SessionConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let api = AuthApiClient::new(http.clone(), config.base_url.clone());
        let tokens = Arc::new(TokenManager::new(
            store,
            api.clone(),
            config.refresh_threshold_secs,
        ));
        let pipeline = HttpPipeline::new(http, tokens.clone());
        let refresh_loop = RefreshLoop::new(tokens.clone(), config.refresh_interval_secs);

        Self {
            config,
            tokens,
            pipeline,
            api,
            refresh_loop,
        }
    }

    /// Build a client with the production transport and file-backed
    /// store.
    pub fn from_config(config: SessionConfig) -> Result<Self, ClientError> {
        let http = crate::adapters::ReqwestHttpClient::new(config.request_timeout())
            .map_err(ClientError::Http)?;
        let store = crate::adapters::FileCredentialStore::new().ok_or_else(|| {
            ClientError::Http(crate::traits::HttpError::Io(
                "could not determine home directory".to_string(),
            ))
        })?;
        Ok(Self::new(config, Arc::new(http), Arc::new(store)))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The token manager, for callers that need direct lifecycle
    /// access (mainly tests and diagnostics).
    pub fn token_manager(&self) -> Arc<TokenManager> {
        self.tokens.clone()
    }

    /// Authenticate and establish a session.
    ///
    /// On success the token pair and user record are persisted
    /// together and the background refresh loop is started. A 4xx from
    /// the server surfaces as `InvalidCredentials` — a login-form
    /// error, not a session death.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<UserRecord, AuthError> {
        let response = self.api.login(identifier, secret).await?;

        let pair = TokenPair {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        };
        self.tokens.begin_session(&pair, &response.user);
        self.refresh_loop.start();

        info!(user = %response.user.email, role = %response.user.role, "signed in");
        Ok(response.user)
    }

    /// End the session.
    ///
    /// The server-side invalidation is best-effort: failures are
    /// logged, never raised — a client must always be able to log out
    /// locally even when the server is unreachable. Local state is
    /// cleared unconditionally, and calling this while already logged
    /// out is a harmless no-op.
    pub async fn logout(&self) {
        self.refresh_loop.stop();

        if let Some(token) = self.tokens.get_access_token() {
            if let Err(err) = self.api.logout(&token).await {
                warn!(error = %err, "server-side logout failed; clearing local session anyway");
            }
        }

        self.tokens.clear_session();
    }

    /// Whether a session exists: a cached user and an access token are
    /// both present. Presence, not freshness — freshness is the
    /// pipeline's job.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.cached_user().is_some() && self.tokens.get_access_token().is_some()
    }

    /// Whether the signed-in user's role is one of `allowed`. False
    /// when logged out. Used by route and permission guards.
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.tokens
            .cached_user()
            .map(|user| allowed.contains(&user.role))
            .unwrap_or(false)
    }

    /// The signed-in user's record, if any.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.tokens.cached_user()
    }

    /// Observe the signed-in state. The receiver flips to `false`
    /// exactly once per genuine session death, which is the UI's cue
    /// to redirect to the login screen.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tokens.subscribe()
    }

    /// Send a resource request through the authenticated pipeline.
    pub async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        self.pipeline.execute(request).await
    }

    /// Start the background refresh loop. No-op when already running.
    pub fn start_background_refresh(&self) {
        self.refresh_loop.start();
    }

    /// Stop the background refresh loop. Idempotent.
    pub fn stop_background_refresh(&self) {
        self.refresh_loop.stop();
    }

    pub fn background_refresh_running(&self) -> bool {
        self.refresh_loop.is_running()
    }
}
