//! `conversations.replies` for the thread view.

use serde::{Deserialize, Serialize};

use crate::{SlackClient, error::DirectoryError};

/// Upper bound Slack accepts for `limit`.
pub const MAX_REPLIES: u32 = 200;

/// A raw message of a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub ts: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
}

#[derive(Deserialize)]
struct RepliesResponse {
    #[serde(default)]
    messages: Vec<SlackMessage>,
}

/// A thread ts is digits with at most one dot, e.g. `1719400000.000100`.
#[must_use]
pub fn is_valid_ts(ts: &str) -> bool {
    !ts.is_empty()
        && ts.chars().all(|c| c.is_ascii_digit() || c == '.')
        && ts.matches('.').count() <= 1
        && ts.chars().any(|c| c.is_ascii_digit())
}

fn is_valid_channel(channel: &str) -> bool {
    !channel.is_empty() && channel.chars().all(|c| c.is_ascii_alphanumeric())
}

impl SlackClient {
    /// Messages of the thread rooted at `ts` in `channel`, root included.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidInput`] for a malformed channel or ts
    /// without calling the API, otherwise transport or API failures.
    pub async fn conversation_replies(
        &self,
        channel: &str,
        ts: &str,
        limit: u32,
    ) -> Result<Vec<SlackMessage>, DirectoryError> {
        if !is_valid_channel(channel) {
            return Err(DirectoryError::InvalidInput(format!("channel '{channel}'")));
        }
        if !is_valid_ts(ts) {
            return Err(DirectoryError::InvalidInput(format!("thread ts '{ts}'")));
        }
        let limit = limit.clamp(1, MAX_REPLIES).to_string();
        let data: RepliesResponse = self
            .call(
                "conversations.replies",
                &[("channel", channel), ("ts", ts), ("limit", &limit)],
            )
            .await?;
        Ok(data.messages)
    }
}
