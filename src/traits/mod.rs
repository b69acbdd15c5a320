//! Trait abstractions for dependency injection.
//!
//! These traits define the seams between the session layer and the
//! outside world:
//!
//! - [`HttpClient`]: HTTP transport operations
//! - [`CredentialStore`]: durable token/user storage
//!
//! Production implementations live in `crate::adapters`; mock
//! implementations for testing live in `crate::adapters::mock`.

pub mod credentials;
pub mod http;

pub use credentials::{CredentialStore, ACCESS_TOKEN_KEY, CURRENT_USER_KEY, REFRESH_TOKEN_KEY};
pub use http::{Headers, HttpClient, HttpError, Method, Request, Response};
