//! Mock adapters for testing.

pub mod credentials;
pub mod http;

pub use credentials::InMemoryCredentialStore;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
