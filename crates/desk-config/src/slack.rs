//! Slack directory configuration.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

fn default_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

/// Default per-lookup timeout in seconds.
const fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`) with `users:read`, `usergroups:read`, and
    /// channel history scopes.
    #[serde(default)]
    pub bot_token: String,

    /// Web API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout applied around each directory lookup.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Static id → name table for identities the directory cannot resolve
    /// (shared mailboxes, service accounts). Wins over any lookup.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            overrides: BTreeMap::new(),
        }
    }
}

impl SlackConfig {
    /// Check if a bot token is available.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty()
    }

    /// Override table keyed by uppercase identifier.
    ///
    /// Environment keys arrive lowercased from figment; Slack identifiers are
    /// always uppercase, so keys are normalized here.
    pub fn override_table(&self) -> HashMap<String, String> {
        self.overrides
            .iter()
            .map(|(id, name)| (id.trim().to_ascii_uppercase(), name.clone()))
            .collect()
    }
}
