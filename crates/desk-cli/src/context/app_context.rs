use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use desk_config::DeskConfig;
use desk_db::{DeskService, TicketDb};
use desk_directory::{IdentityResolver, SlackClient};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: DeskService<SlackClient>,
    pub config: DeskConfig,
}

impl AppContext {
    pub async fn init(config: DeskConfig) -> anyhow::Result<Self> {
        let db = TicketDb::open(&config.database)
            .await
            .with_context(|| format!("failed to open ticket table '{}'", config.database.table))?
            .with_board(config.board.clone());

        let timeout = Duration::from_secs(config.slack.timeout_secs);
        let client = SlackClient::new(&config.slack.bot_token, &config.slack.api_base_url, timeout)
            .context("failed to build Slack client")?;
        let resolver = IdentityResolver::new(client)
            .with_overrides(config.slack.override_table())
            .with_timeout(timeout);

        let service = DeskService::new(db, Arc::new(resolver)).context("invalid board settings")?;

        Ok(Self { service, config })
    }

    pub fn resolver(&self) -> &IdentityResolver<SlackClient> {
        self.service.resolver()
    }

    pub fn slack(&self) -> &SlackClient {
        self.resolver().directory()
    }
}
