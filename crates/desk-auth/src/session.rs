use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::id_token::IdentityClaims;

/// A logged-in user, persisted between CLI runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: Option<String>,
    pub logged_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn from_claims(claims: IdentityClaims, now: DateTime<Utc>) -> Self {
        Self {
            email: claims.email,
            name: claims.name,
            logged_in_at: now,
            expires_at: claims.expires_at,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Turn a stored session into a usable one.
///
/// # Errors
///
/// `NotAuthenticated` without a session, `SessionExpired` past its expiry.
pub fn check_session(stored: Option<Session>, now: DateTime<Utc>) -> Result<Session, AuthError> {
    let session = stored.ok_or(AuthError::NotAuthenticated)?;
    if session.is_expired(now) {
        return Err(AuthError::SessionExpired);
    }
    Ok(session)
}
