//! Error handling for the session layer.
//!
//! Two domains of failure exist here:
//!
//! - [`AuthError`]: login rejections, session expiry, auth-server
//!   failures
//! - [`HttpError`](crate::traits::HttpError): transport failures on any
//!   request
//!
//! [`ClientError`] unifies the two for callers of the request pipeline,
//! which can fail either way.

mod auth;

pub use auth::AuthError;

use crate::traits::HttpError;
use std::fmt;

/// Unified error type returned by the request pipeline and facade.
#[derive(Debug, Clone)]
pub enum ClientError {
    /// Authentication failed (login, refresh, or post-retry rejection).
    Auth(AuthError),
    /// Transport-level failure on the request itself.
    Http(HttpError),
}

impl ClientError {
    /// Check if this error means the user must sign in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ClientError::Auth(err) => err.requires_reauth(),
            ClientError::Http(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(err) => err.user_message(),
            ClientError::Http(_) => {
                "The request could not be completed. Check your connection and try again."
                    .to_string()
            }
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(err) => write!(f, "{}", err),
            ClientError::Http(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Auth(err) => Some(err),
            ClientError::Http(err) => Some(err),
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        ClientError::Auth(err)
    }
}

impl From<HttpError> for ClientError {
    fn from(err: HttpError) -> Self {
        ClientError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_delegate_reauth() {
        let expired: ClientError = AuthError::AuthenticationExpired {
            message: "gone".to_string(),
        }
        .into();
        assert!(expired.requires_reauth());

        let invalid: ClientError = AuthError::InvalidCredentials {
            message: "nope".to_string(),
        }
        .into();
        assert!(!invalid.requires_reauth());
    }

    #[test]
    fn test_http_errors_never_require_reauth() {
        let err: ClientError = HttpError::Timeout("30s".to_string()).into();
        assert!(!err.requires_reauth());
        assert!(err.user_message().contains("connection"));
    }

    #[test]
    fn test_display_passthrough() {
        let err: ClientError = AuthError::NotAuthenticated.into();
        assert_eq!(err.to_string(), "Not authenticated");

        let err: ClientError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_error_source_chain() {
        let err: ClientError = AuthError::NotAuthenticated.into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
