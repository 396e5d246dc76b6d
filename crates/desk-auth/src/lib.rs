//! # desk-auth
//!
//! Browser sign-in against an OAuth identity provider for the deskboard CLI.
//!
//! Login runs on a loopback callback (`tiny_http` + `open`), the ID token's
//! email is checked against an allow-list, and the resulting session is kept
//! in the OS keychain (`keyring`) with a file fallback.

pub mod browser_flow;
pub mod error;
pub mod gate;
pub mod id_token;
pub mod oauth;
pub mod session;
pub mod session_store;

pub use error::AuthError;
pub use oauth::OAuthSettings;
pub use session::Session;

/// The current session, if one is stored and still valid.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` or `AuthError::SessionExpired`.
pub fn require_login() -> Result<Session, AuthError> {
    session::check_session(session_store::load(), chrono::Utc::now())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the session file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    session_store::delete()
}
