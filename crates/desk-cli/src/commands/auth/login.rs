use std::time::Duration;

use desk_auth::OAuthSettings;
use desk_config::DeskConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    email: String,
    name: Option<String>,
    expires_at: String,
}

pub async fn handle(flags: &GlobalFlags, config: &DeskConfig) -> anyhow::Result<()> {
    let auth = config.require_auth()?;
    let settings = OAuthSettings::from_config(auth);
    let session = desk_auth::browser_flow::login(
        &settings,
        &auth.allowed_email_list(),
        Duration::from_secs(auth.login_timeout_secs),
    )
    .await?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            email: session.email,
            name: session.name,
            expires_at: session.expires_at.to_rfc3339(),
        },
        flags.format,
    )
}
