//! Authorization-code endpoints of the identity provider.

use desk_config::AuthConfig;
use serde::Deserialize;

use crate::error::AuthError;

/// Scopes requested at sign-in.
pub const SCOPES: &str = "openid email profile";

/// Client registration used for the login flow.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub authority_url: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthSettings {
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            authority_url: config.authority_url.trim_end_matches('/').to_string(),
            tenant_id: config.tenant_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    #[must_use]
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/{}/oauth2/v2.0/authorize", self.authority_url, self.tenant_id)
    }

    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_url, self.tenant_id)
    }
}

/// Sign-in URL the browser is sent to.
#[must_use]
pub fn authorize_url(settings: &OAuthSettings, redirect_uri: &str, state: &str) -> String {
    format!(
        "{}?client_id={}&response_type=code&response_mode=query&redirect_uri={}&scope={}&state={}",
        settings.authorize_endpoint(),
        urlencoding::encode(&settings.client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(SCOPES),
        urlencoding::encode(state),
    )
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub id_token: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Form body for the code exchange.
fn exchange_body(settings: &OAuthSettings, code: &str, redirect_uri: &str) -> String {
    [
        ("grant_type", "authorization_code"),
        ("client_id", settings.client_id.as_str()),
        ("client_secret", settings.client_secret.as_str()),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("scope", SCOPES),
    ]
    .iter()
    .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&")
}

/// Trade an authorization code for tokens.
///
/// # Errors
///
/// Returns `AuthError::Http` on transport failure and
/// `AuthError::TokenExchange` when the provider rejects the code.
pub async fn exchange_code(
    http: &reqwest::Client,
    settings: &OAuthSettings,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse, AuthError> {
    let resp = http
        .post(settings.token_endpoint())
        .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(exchange_body(settings, code, redirect_uri))
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
            |_| format!("HTTP {}", status.as_u16()),
            |e| match e.error_description {
                Some(description) => format!("{}: {description}", e.error),
                None => e.error,
            },
        );
        return Err(AuthError::TokenExchange(message));
    }
    serde_json::from_str(&body).map_err(|e| AuthError::TokenExchange(format!("unexpected response: {e}")))
}
