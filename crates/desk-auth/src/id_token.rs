//! ID token payload decoding.
//!
//! The token comes straight from the provider's token endpoint over TLS, so
//! only the payload is read; the signature is not checked.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims the gate needs from an ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub email: String,
    pub name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    exp: Option<i64>,
}

/// Decode the payload of an ID token.
///
/// The email is `preferred_username`, falling back to `email`.
///
/// # Errors
///
/// Returns `AuthError::IdToken` if the token is not three dot-separated
/// parts, the payload is not base64url JSON, or the email or `exp` claim is
/// missing.
pub fn decode_id_token(jwt: &str) -> Result<IdentityClaims, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::IdToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::IdToken(format!("base64 decode failed: {e}")))?;
    let raw: RawClaims =
        serde_json::from_slice(&payload).map_err(|e| AuthError::IdToken(format!("JSON parse failed: {e}")))?;

    let email = raw
        .preferred_username
        .or(raw.email)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AuthError::IdToken("missing email claim".into()))?;
    let exp = raw.exp.ok_or_else(|| AuthError::IdToken("missing exp claim".into()))?;
    let expires_at =
        DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::IdToken("invalid exp timestamp".into()))?;

    Ok(IdentityClaims {
        email,
        name: raw.name,
        expires_at,
    })
}
