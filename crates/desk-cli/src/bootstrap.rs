use desk_config::DeskConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<DeskConfig> {
    DeskConfig::load_with_dotenv().map_err(anyhow::Error::from)
}

/// Data commands need a live session when the board requires login.
pub fn ensure_session(config: &DeskConfig) -> anyhow::Result<()> {
    if !config.auth.required {
        return Ok(());
    }
    let session = desk_auth::require_login()?;
    desk_auth::gate::ensure_allowed(&session.email, &config.auth.allowed_email_list())?;
    tracing::debug!(email = %session.email, "session accepted");
    Ok(())
}
