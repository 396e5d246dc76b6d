//! # desk-config
//!
//! Layered configuration loading for deskboard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DESK_*` prefix, `__` as separator)
//! 2. Project-level `./desk.toml`
//! 3. User-level `~/.config/deskboard/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `DESK_SLACK__BOT_TOKEN` -> `slack.bot_token`,
//! `DESK_BOARD__PAGE_SIZE` -> `board.page_size`, and so on.
//!
//! ```no_run
//! use desk_config::DeskConfig;
//!
//! let config = DeskConfig::load_with_dotenv().expect("config");
//! if config.slack.is_configured() {
//!     println!("Slack API: {}", config.slack.api_base_url);
//! }
//! ```

mod auth;
mod board;
mod database;
mod error;
mod slack;

pub use auth::AuthConfig;
pub use board::BoardConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use slack::SlackConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "DESK_";

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "desk.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

impl DeskConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on malformed sources and
    /// `ConfigError::InvalidValue` when a value fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working tree, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would break paging or timestamp display.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.page_size == 0 {
            return Err(invalid("board.page_size", "must be at least 1"));
        }
        if self.board.sla_days < 0 {
            return Err(invalid("board.sla_days", "must not be negative"));
        }
        if self.board.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(invalid("board.utc_offset_minutes", "must be within ±24h"));
        }
        if self.slack.timeout_secs == 0 {
            return Err(invalid("slack.timeout_secs", "must be at least 1"));
        }
        if self.database.table.trim().is_empty() {
            return Err(invalid("database.table", "must not be empty"));
        }
        Ok(())
    }

    /// Fail with `NotConfigured` unless the Slack token is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `slack` section.
    pub fn require_slack(&self) -> Result<&SlackConfig, ConfigError> {
        if self.slack.is_configured() {
            Ok(&self.slack)
        } else {
            Err(ConfigError::NotConfigured {
                section: "slack".into(),
            })
        }
    }

    /// Fail with `NotConfigured` unless the OAuth client is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `auth` section.
    pub fn require_auth(&self) -> Result<&AuthConfig, ConfigError> {
        if self.auth.is_configured() {
            Ok(&self.auth)
        } else {
            Err(ConfigError::NotConfigured {
                section: "auth".into(),
            })
        }
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("deskboard").join("config.toml"))
    }

    /// Load `.env` from the current directory or any parent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}
