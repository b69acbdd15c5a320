//! Auth server API client.
//!
//! This module provides the HTTP client for the platform's
//! authentication endpoints: login, token refresh, and logout. It
//! talks through the [`HttpClient`] trait so the same logic runs
//! against the production transport or a mock in tests.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::AuthError;
use crate::models::UserRecord;
use crate::traits::{HttpClient, Request, Response};

/// Maximum length of an error response body carried into an error
/// message.
const MAX_ERROR_BODY_LEN: usize = 200;

/// Response from `POST /login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserRecord,
}

/// Response from `POST /refresh`.
///
/// The server may rotate the refresh token; when it does, the new one
/// replaces the stored one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Client for the platform's authentication endpoints.
///
/// Clone is cheap: the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct AuthApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl AuthApiClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticate with an identifier/secret pair.
    ///
    /// `POST /login`
    ///
    /// A 4xx answer means the server rejected the pair
    /// (`InvalidCredentials`); any 5xx or unparseable answer is a
    /// server error.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginResponse, AuthError> {
        let body = serde_json::json!({
            "identifier": identifier,
            "secret": secret,
        });

        let request = Request::post(format!("{}/login", self.base_url), body.to_string())
            .with_header("Content-Type", "application/json");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if response.is_success() {
            debug!("login accepted");
            return response.json().map_err(|e| AuthError::Server {
                status: response.status,
                message: format!("invalid login response: {}", e),
            });
        }

        let status = response.status;
        let message = truncate_body(&response);
        if (400..500).contains(&status) {
            Err(AuthError::InvalidCredentials { message })
        } else {
            Err(AuthError::Server { status, message })
        }
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// `POST /refresh`
    ///
    /// Any failure here — transport, 4xx, 5xx, unparseable body — is
    /// surfaced as-is; the token manager turns it into a terminal
    /// session death.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let body = serde_json::json!({
            "refreshToken": refresh_token,
        });

        let request = Request::post(format!("{}/refresh", self.base_url), body.to_string())
            .with_header("Content-Type", "application/json");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if response.is_success() {
            return response.json().map_err(|e| AuthError::Server {
                status: response.status,
                message: format!("invalid refresh response: {}", e),
            });
        }

        Err(AuthError::Server {
            status: response.status,
            message: truncate_body(&response),
        })
    }

    /// Invalidate the session server-side.
    ///
    /// `POST /logout`
    ///
    /// Callers treat failures here as best-effort: a client must always
    /// be able to log out locally even when the server is unreachable.
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let mut request = Request::post(format!("{}/logout", self.base_url), String::new());
        request.set_bearer(access_token);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if response.is_success() {
            Ok(())
        } else {
            Err(AuthError::Server {
                status: response.status,
                message: truncate_body(&response),
            })
        }
    }
}

/// Body text for error messages, truncated to keep logs readable.
fn truncate_body(response: &Response) -> String {
    let text = response.text().unwrap_or_default();
    if text.len() <= MAX_ERROR_BODY_LEN {
        text
    } else {
        format!("{}... (truncated)", &text[..MAX_ERROR_BODY_LEN])
    }
}
