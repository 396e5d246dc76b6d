//! Ticket store configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    "deskboard.db".to_string()
}

fn default_table() -> String {
    "service_orders".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote libSQL URL (e.g., `libsql://tickets.turso.io`). Empty = local file.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file used when no remote URL is set.
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Ticket table to read. One table per board.
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
            table: default_table(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }
}
