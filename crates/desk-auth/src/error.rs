use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `desk auth login`")]
    NotAuthenticated,

    #[error("session expired, run `desk auth login` again")]
    SessionExpired,

    #[error("access denied for {email}")]
    NotAllowed { email: String },

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("invalid ID token: {0}")]
    IdToken(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
