//! Background token refresh loop.
//!
//! A periodic task that proactively refreshes the access token before
//! expiry so that, in normal operation, no user-facing request ever
//! observes an expired token. At most one loop runs per process;
//! starting it twice is a no-op and it is stoppable without leaking
//! the timer task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, warn};

use crate::auth::manager::TokenManager;

/// Periodic proactive refresh driver.
pub struct RefreshLoop {
    tokens: Arc<TokenManager>,
    interval_secs: u64,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshLoop {
    pub fn new(tokens: Arc<TokenManager>, interval_secs: u64) -> Self {
        Self {
            tokens,
            interval_secs,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Start the loop. A no-op when it is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("background refresh already running");
            return;
        }

        let tokens = self.tokens.clone();
        let running = self.running.clone();
        let interval_secs = self.interval_secs;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            loop {
                ticker.tick().await;
                if !running.load(Ordering::SeqCst) {
                    debug!("background refresh stopping");
                    break;
                }
                // Refresh failures already clear the session inside the
                // manager; here they only get logged so the timer task
                // never unwinds.
                match tokens.refresh_if_due().await {
                    Ok(true) => debug!("background refresh renewed the access token"),
                    Ok(false) => {}
                    Err(err) => warn!(error = %err, "background refresh failed"),
                }
            }
        });

        *self.handle.lock().unwrap() = Some(handle);
        debug!(interval_secs, "background refresh started");
    }

    /// Stop the loop and drop its timer task. Idempotent.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            if let Some(handle) = self.handle.lock().unwrap().take() {
                handle.abort();
            }
            debug!("background refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentialStore, MockHttpClient};
    use crate::auth::api::AuthApiClient;

    fn make_loop(interval_secs: u64) -> RefreshLoop {
        let store = Arc::new(InMemoryCredentialStore::new());
        let http = Arc::new(MockHttpClient::new());
        let api = AuthApiClient::new(http, "http://localhost:1");
        let tokens = Arc::new(TokenManager::new(store, api, 300));
        RefreshLoop::new(tokens, interval_secs)
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let refresh_loop = make_loop(3600);
        assert!(!refresh_loop.is_running());

        refresh_loop.start();
        assert!(refresh_loop.is_running());

        // Second start must not panic or spawn a second task
        refresh_loop.start();
        assert!(refresh_loop.is_running());

        refresh_loop.stop();
        assert!(!refresh_loop.is_running());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let refresh_loop = make_loop(3600);
        refresh_loop.stop();
        assert!(!refresh_loop.is_running());

        refresh_loop.start();
        refresh_loop.stop();
        refresh_loop.stop();
        assert!(!refresh_loop.is_running());
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let refresh_loop = make_loop(3600);
        refresh_loop.start();
        refresh_loop.stop();
        refresh_loop.start();
        assert!(refresh_loop.is_running());
        refresh_loop.stop();
    }
}
