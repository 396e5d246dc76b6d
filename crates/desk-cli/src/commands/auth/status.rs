use desk_auth::AuthError;
use desk_config::DeskConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    required: bool,
    email: Option<String>,
    name: Option<String>,
    expires_at: Option<String>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags, config: &DeskConfig) -> anyhow::Result<()> {
    let status = describe(desk_auth::require_login(), config);
    output(&status, flags.format)
}

fn describe(login: Result<desk_auth::Session, AuthError>, config: &DeskConfig) -> AuthStatusResponse {
    let required = config.auth.required;
    match login {
        Ok(session) => AuthStatusResponse {
            authenticated: true,
            required,
            email: Some(session.email),
            name: session.name,
            expires_at: Some(session.expires_at.to_rfc3339()),
            note: None,
        },
        Err(error) => AuthStatusResponse {
            authenticated: false,
            required,
            email: None,
            name: None,
            expires_at: None,
            note: Some(if config.auth.is_configured() {
                error.to_string()
            } else {
                "OAuth client not configured (DESK_AUTH__TENANT_ID, DESK_AUTH__CLIENT_ID, DESK_AUTH__CLIENT_SECRET)"
                    .to_string()
            }),
        },
    }
}
