//! Client-side bearer token inspection.
//!
//! The backend issues a JWT (three dot-separated segments, middle segment
//! base64-encoded JSON claims). The client never verifies the signature -
//! that is the backend's job on every request - it only reads the claims
//! to know who is signed in. Decoding is tolerant: any failure degrades to
//! a fallback identity (login) or to "not signed in" (startup check).

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::Deserialize;
use taskdeck_core::session::UserIdentity;

/// Identity id used when the token carries no usable id claim.
const UNKNOWN_USER_ID: &str = "unknown";

/// The claims the client reads. `user_id` is the backend's primary key;
/// `sub` carries the email in this backend's tokens, with `email` accepted
/// as well for forward compatibility.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

fn decode_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    // JWT payloads are URL-safe base64 without padding; tolerate standard
    // alphabet tokens from older backends.
    let payload = segments[1];
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;

    serde_json::from_slice(&bytes).ok()
}

/// Decodes the identity for a freshly issued token.
///
/// Any decode failure falls back to the email the user just typed and an
/// `"unknown"` id, so a backend with an unexpected token format still
/// signs the user in.
pub fn identity_from_token(token: &str, fallback_email: &str) -> UserIdentity {
    match decode_claims(token) {
        Some(claims) => UserIdentity {
            id: claims.user_id.unwrap_or_else(|| UNKNOWN_USER_ID.to_string()),
            email: claims
                .email
                .or(claims.sub)
                .unwrap_or_else(|| fallback_email.to_string()),
        },
        None => UserIdentity {
            id: UNKNOWN_USER_ID.to_string(),
            email: fallback_email.to_string(),
        },
    }
}

/// Decodes the identity for a token read back from storage.
///
/// With no typed email to fall back to, an undecodable token (or one with
/// no email-bearing claim) reads as "not signed in".
pub fn stored_identity(token: &str) -> Option<UserIdentity> {
    let claims = decode_claims(token)?;
    let email = claims.email.or(claims.sub)?;
    Some(UserIdentity {
        id: claims.user_id.unwrap_or_else(|| UNKNOWN_USER_ID.to_string()),
        email,
    })
}
