//! `bots.info` lookups.

use serde::Deserialize;

use crate::{SlackClient, error::DirectoryError};

#[derive(Deserialize)]
struct BotInfoResponse {
    bot: SlackBot,
}

#[derive(Deserialize)]
struct SlackBot {
    #[serde(default)]
    name: String,
}

impl SlackClient {
    /// Name of a bot integration.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport or API failure, and
    /// [`DirectoryError::NotFound`] when the bot name is blank.
    pub async fn bot_name(&self, bot_id: &str) -> Result<String, DirectoryError> {
        let data: BotInfoResponse = self.call("bots.info", &[("bot", bot_id)]).await?;
        let name = data.bot.name.trim();
        if name.is_empty() {
            return Err(DirectoryError::NotFound(bot_id.to_string()));
        }
        Ok(name.to_string())
    }
}
