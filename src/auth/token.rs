//! Access/refresh token model and JWT expiry inspection.
//!
//! The client never validates token signatures (that is the server's
//! job); it only decodes the embedded `exp` claim to schedule
//! refreshes. Anything undecodable is treated as already expired,
//! never as a crash.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// The access/refresh token pair issued by the auth server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived credential attached to resource requests.
    pub access_token: String,
    /// Long-lived credential used solely to obtain new access tokens.
    pub refresh_token: String,
}

/// JWT claims for extracting the expiration time.
#[derive(Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Extract the `exp` claim (seconds since epoch) from a JWT access
/// token without validating the signature.
///
/// Returns `None` if the token cannot be parsed for any reason —
/// wrong segment count, invalid base64, invalid JSON, missing claim.
pub fn decode_expiry(access_token: &str) -> Option<i64> {
    let parts: Vec<&str> = access_token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&payload).ok()?;
    Some(claims.exp)
}

/// Check whether a token expires within `threshold_secs` from now.
///
/// Returns `true` for undecodable tokens. The comparison is strict:
/// a token with exactly `threshold_secs` of life left is not yet due.
pub fn expires_within(access_token: &str, threshold_secs: i64) -> bool {
    match decode_expiry(access_token) {
        Some(exp) => exp - chrono::Utc::now().timestamp() < threshold_secs,
        None => true,
    }
}
