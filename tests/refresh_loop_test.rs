//! Integration tests for the background refresh loop.
//!
//! These tests verify the proactive refresh behavior:
//! - a due token is renewed by the loop without any request traffic
//! - a fresh token is left alone
//! - the loop survives refresh failures without unwinding

mod common;

use std::sync::Arc;
use std::time::Duration;

use stafflink::adapters::mock::InMemoryCredentialStore;
use stafflink::adapters::ReqwestHttpClient;
use stafflink::auth::{AuthApiClient, RefreshLoop, TokenManager, TokenPair};
use stafflink::traits::CredentialStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{expired_jwt, fresh_jwt};

fn make_manager(base_url: &str) -> (Arc<TokenManager>, Arc<InMemoryCredentialStore>) {
    common::init_tracing();
    let store = Arc::new(InMemoryCredentialStore::new());
    let http = Arc::new(ReqwestHttpClient::new(Duration::from_secs(5)).unwrap());
    let api = AuthApiClient::new(http, base_url);
    let manager = Arc::new(TokenManager::new(store.clone(), api, 300));
    (manager, store)
}

#[tokio::test]
async fn test_loop_renews_a_due_token() {
    let mock_server = MockServer::start().await;
    let renewed = fresh_jwt();

    // The first tick renews the token; later ticks see it fresh and
    // leave it alone
    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessToken": renewed,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (manager, store) = make_manager(&mock_server.uri());
    manager.set_tokens(&TokenPair {
        access_token: expired_jwt(),
        refresh_token: "refresh-1".to_string(),
    });

    let refresh_loop = RefreshLoop::new(manager.clone(), 1);
    refresh_loop.start();

    // Cover the immediate tick plus one more interval
    tokio::time::sleep(Duration::from_millis(1500)).await;
    refresh_loop.stop();

    assert_eq!(store.get("access_token").as_deref(), Some(renewed.as_str()));
}

#[tokio::test]
async fn test_loop_leaves_a_fresh_token_alone() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (manager, _store) = make_manager(&mock_server.uri());
    manager.set_tokens(&TokenPair {
        access_token: fresh_jwt(),
        refresh_token: "refresh-1".to_string(),
    });

    let refresh_loop = RefreshLoop::new(manager.clone(), 1);
    refresh_loop.start();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    refresh_loop.stop();
}

#[tokio::test]
async fn test_loop_survives_a_failing_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(400).set_body_string("revoked"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (manager, store) = make_manager(&mock_server.uri());
    manager.set_tokens(&TokenPair {
        access_token: expired_jwt(),
        refresh_token: "refresh-1".to_string(),
    });

    let refresh_loop = RefreshLoop::new(manager.clone(), 1);
    refresh_loop.start();

    // The failing tick clears the session; later ticks see no token
    // and do nothing, and the loop itself keeps running
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(refresh_loop.is_running());
    refresh_loop.stop();

    assert!(store.is_empty());
    assert!(manager.get_access_token().is_none());
}

#[tokio::test]
async fn test_loop_idles_when_logged_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (manager, _store) = make_manager(&mock_server.uri());

    let refresh_loop = RefreshLoop::new(manager, 1);
    refresh_loop.start();
    tokio::time::sleep(Duration::from_millis(600)).await;
    refresh_loop.stop();
}
