//! OAuth login gate configuration.

use serde::{Deserialize, Serialize};

fn default_authority_url() -> String {
    "https://login.microsoftonline.com".to_string()
}

/// Default browser login timeout in seconds.
const fn default_login_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Identity provider authority (tenant id is appended).
    #[serde(default = "default_authority_url")]
    pub authority_url: String,

    /// Directory tenant id.
    #[serde(default)]
    pub tenant_id: String,

    /// OAuth client id.
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,

    /// Comma-separated list of emails allowed in.
    #[serde(default)]
    pub allowed_emails: String,

    /// Whether data commands require a logged-in session.
    #[serde(default)]
    pub required: bool,

    /// How long the browser login waits for the callback.
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority_url: default_authority_url(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            allowed_emails: String::new(),
            required: false,
            login_timeout_secs: default_login_timeout_secs(),
        }
    }
}

impl AuthConfig {
    /// Check if the OAuth client has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.tenant_id.is_empty() && !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Allowed emails, trimmed and lowercased, empties dropped.
    pub fn allowed_email_list(&self) -> Vec<String> {
        self.allowed_emails
            .split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect()
    }
}
