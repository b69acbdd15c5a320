//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors, including per-URL response sequences for
//! exercising retry paths (a 401 followed by a 200 on the same URL).

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Request, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method name ("GET", "POST", ...)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST/PUT requests)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// The bearer token this request carried, if any.
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful (or any-status) response
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// Responses can be *queued* per URL (consumed one per request, for
/// sequences like 401-then-200) or set *sticky* (answer every request
/// to a URL, with prefix matching). Queued responses win over sticky
/// ones; with neither configured the default response answers, and
/// with no default the call fails.
///
/// All requests are recorded for verification.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Per-URL response sequences, consumed front-to-back
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Sticky responses by URL pattern (exact, then prefix match)
    sticky: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when nothing else matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a URL. Each request to that URL consumes
    /// one queued response in order.
    pub fn enqueue_response(&self, url: &str, response: MockResponse) {
        let mut queued = self.queued.lock().unwrap();
        queued.entry(url.to_string()).or_default().push_back(response);
    }

    /// Set a sticky response for a URL (answers every request).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut sticky = self.sticky.lock().unwrap();
        sticky.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests to a specific URL.
    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == url)
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, request: &Request) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        // Queued responses first, consumed in order
        {
            let mut queued = self.queued.lock().unwrap();
            if let Some(queue) = queued.get_mut(url) {
                if let Some(response) = queue.pop_front() {
                    return Some(response);
                }
            }
        }

        // Then sticky: exact match, then prefix match
        {
            let sticky = self.sticky.lock().unwrap();
            if let Some(response) = sticky.get(url) {
                return Some(response.clone());
            }
            for (pattern, response) in sticky.iter() {
                if url.starts_with(pattern) {
                    return Some(response.clone());
                }
            }
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        self.record_request(&request);

        match self.next_response(&request.url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(HttpError::Other(format!(
                "no mock response configured for URL: {}",
                request.url
            ))),
        }
    }
}
