use desk_config::DeskConfig;

/// Warn about sections that fell back to defaults while `DESK_*` vars exist.
pub fn warn_unconfigured(config: &DeskConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DeskConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.slack.is_configured() {
        if has_env_prefix(&env_keys, "DESK_SLACK") {
            warnings.push(
                "Slack config appears default while DESK_SLACK* env vars exist. Use double underscores (example: DESK_SLACK__BOT_TOKEN)."
                    .to_string(),
            );
        } else {
            warnings.push("Slack bot token not configured; names will show as placeholders.".to_string());
        }
    }

    if !config.database.is_remote() && has_env_prefix(&env_keys, "DESK_DATABASE") && !has_env_prefix(&env_keys, "DESK_DATABASE__") {
        warnings.push(
            "Database config appears default while DESK_DATABASE* env vars exist. Use double underscores (example: DESK_DATABASE__URL)."
                .to_string(),
        );
    }

    if config.auth.required && !config.auth.is_configured() {
        warnings.push("auth.required is set but the OAuth client is not configured.".to_string());
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
