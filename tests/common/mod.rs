//! Shared helpers for integration tests.

// Not every test binary uses every helper
#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the test log subscriber once per binary. Run with
/// `RUST_LOG=stafflink=debug` to see the session layer's tracing.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build an unsigned JWT with the given `exp` claim, the same shape
/// the auth server issues. The signature is fake; the client never
/// validates it.
pub fn make_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{},"sub":"1"}}"#, exp));
    let signature = URL_SAFE_NO_PAD.encode("test-signature");
    format!("{}.{}.{}", header, payload, signature)
}

/// A JWT with an hour of life left.
pub fn fresh_jwt() -> String {
    make_jwt(chrono::Utc::now().timestamp() + 3600)
}

/// A JWT that expired an hour ago.
pub fn expired_jwt() -> String {
    make_jwt(chrono::Utc::now().timestamp() - 3600)
}

/// A JWT inside the 5-minute refresh threshold (4 minutes left).
pub fn expiring_soon_jwt() -> String {
    make_jwt(chrono::Utc::now().timestamp() + 240)
}
