//! Bearer token payload decoding
//!
//! A token is three dot-separated segments; the middle segment is a
//! base64url-encoded JSON object. The signature is never checked here,
//! that is the server's job. Every decoding failure collapses to `None`,
//! so callers treat an unreadable token like an expired one.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

/// Decode the payload segment of a bearer token without verifying it.
///
/// Returns `None` unless the token has exactly three dot-separated
/// segments and the middle one decodes to a JSON value.
pub fn decode_payload(token: &str) -> Option<Value> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };

    // Issuers differ on padding; the no-pad engine covers both once
    // trailing '=' is stripped.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Expiry of the token as epoch milliseconds.
///
/// Reads the numeric `exp` claim (epoch seconds) from the payload;
/// `None` when the token is unreadable or carries no numeric `exp`.
pub fn expiry_ms(token: &str) -> Option<i64> {
    let payload = decode_payload(token)?;
    let exp = payload.get("exp")?.as_f64()?;
    Some((exp * 1000.0) as i64)
}
