//! Authentication-related error types.
//!
//! This module defines errors related to login, token refresh, and
//! session lifecycle.

use std::fmt;

/// Authentication-specific error variants.
///
/// `InvalidCredentials` and `AuthenticationExpired` are deliberately
/// distinct: the first is a login-time rejection the UI shows inline,
/// the second is a post-login session death that triggers a redirect
/// to the login screen.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Login rejected by the server (bad identifier/secret pair).
    InvalidCredentials { message: String },

    /// The session is over: a token refresh failed, or a request was
    /// rejected even after one refresh-and-retry.
    AuthenticationExpired { message: String },

    /// No session exists (user never logged in or already logged out).
    NotAuthenticated,

    /// Transport failure while talking to the auth server.
    Network { message: String },

    /// The auth server answered with an unexpected status.
    Server { status: u16, message: String },
}

impl AuthError {
    /// Check if this error means the user must sign in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::AuthenticationExpired { .. } | AuthError::NotAuthenticated
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { .. } => {
                "Email or password is incorrect. Please try again.".to_string()
            }
            AuthError::AuthenticationExpired { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AuthError::Server { status, message } => {
                format!("The server reported an error ({}): {}", status, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::AuthenticationExpired { .. } => "E_AUTH_EXPIRED",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::Network { .. } => "E_AUTH_NET",
            AuthError::Server { .. } => "E_AUTH_SERVER",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::AuthenticationExpired { message } => {
                write!(f, "Authentication expired: {}", message)
            }
            AuthError::NotAuthenticated => {
                write!(f, "Not authenticated")
            }
            AuthError::Network { message } => {
                write!(f, "Network failure: {}", message)
            }
            AuthError::Server { status, message } => {
                write!(f, "Auth server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
