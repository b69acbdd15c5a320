//! Authenticated request pipeline.
//!
//! Every outbound resource request passes through here. Two
//! interception points wrap the transport:
//!
//! - *Pre-send*: a stored token that is expired (or due inside the
//!   refresh threshold) is refreshed before it is attached; a request
//!   is never sent with a known-stale credential. With no stored token
//!   the request goes out without credentials (pre-login endpoints).
//! - *Post-response*: a 401 triggers one refresh-and-retry with the
//!   fresh token. A second failure — another 401 or a transport error
//!   on the retry — clears the session and propagates. A request is
//!   retried at most once.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::TokenManager;
use crate::error::{AuthError, ClientError};
use crate::traits::{HttpClient, Request, Response};

/// Decorator around the transport that keeps requests authenticated.
#[derive(Clone)]
pub struct HttpPipeline {
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenManager>,
}

impl HttpPipeline {
    pub fn new(http: Arc<dyn HttpClient>, tokens: Arc<TokenManager>) -> Self {
        Self { http, tokens }
    }

    /// Send a request with transparent token handling.
    ///
    /// Returns the response for any status except a 401 that survives
    /// the single refresh-and-retry; non-401 error statuses pass
    /// through untouched for the caller to interpret.
    pub async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let mut request = request;

        // Pre-send: never attach a token that is already due.
        match self.tokens.get_access_token() {
            Some(token) if self.tokens.is_expired(&token) => {
                debug!(url = %request.url, "access token due; refreshing before send");
                let fresh = self.tokens.refresh_access_token().await?;
                request.set_bearer(&fresh);
            }
            Some(token) => request.set_bearer(&token),
            None => {}
        }

        let response = self.http.execute(request.clone()).await?;
        if response.status != 401 {
            return Ok(response);
        }

        // Reactive path: one refresh, one retry.
        debug!(url = %request.url, "request rejected with 401; refreshing and retrying once");
        let fresh = self.tokens.refresh_access_token().await?;

        let mut retry = request;
        retry.set_bearer(&fresh);
        let second = match self.http.execute(retry).await {
            Ok(second) => second,
            Err(err) => {
                warn!(error = %err, "retry after refresh failed; clearing session");
                self.tokens.clear_session();
                return Err(ClientError::Http(err));
            }
        };

        if second.status == 401 {
            warn!("request rejected again after refresh; session is over");
            self.tokens.clear_session();
            return Err(ClientError::Auth(AuthError::AuthenticationExpired {
                message: "request rejected after token refresh".to_string(),
            }));
        }

        Ok(second)
    }
}
