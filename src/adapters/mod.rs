//! Adapter implementations of the trait abstractions.
//!
//! Production adapters wrap real infrastructure (reqwest, the
//! filesystem); the `mock` submodule provides configurable test
//! doubles for the same traits.

pub mod file_credentials;
pub mod mock;
pub mod reqwest_http;

pub use file_credentials::FileCredentialStore;
pub use reqwest_http::ReqwestHttpClient;
