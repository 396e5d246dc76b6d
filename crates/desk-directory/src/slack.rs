//! Slack Web API client.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::DirectoryError;
use crate::http::{check_response, slack_payload};

/// Default Web API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

/// HTTP client for the Slack Web API methods deskboard reads.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    /// Create a client with a bot token, base URL, and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying client fails to build.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("deskboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a method URL with percent-encoded query parameters.
    pub(crate) fn method_url(&self, method: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{method}", self.base_url);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// GET a Web API method and unwrap its envelope.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        let url = self.method_url(method, params);
        tracing::debug!(method, "slack api call");
        let resp = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let body: serde_json::Value = check_response(resp).await?.json().await?;
        slack_payload(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SlackClient {
        SlackClient::new("xoxb-test", "https://slack.example/api/", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn method_url_without_params() {
        assert_eq!(
            client().method_url("usergroups.list", &[]),
            "https://slack.example/api/usergroups.list"
        );
    }

    #[test]
    fn method_url_encodes_params() {
        assert_eq!(
            client().method_url("conversations.replies", &[("channel", "C01"), ("ts", "1.2 3")]),
            "https://slack.example/api/conversations.replies?channel=C01&ts=1.2%203"
        );
    }

    #[tokio::test]
    #[ignore = "requires network and a bot token"]
    async fn live_auth_failure_is_slack_error() {
        let client = SlackClient::new("xoxb-invalid", DEFAULT_API_BASE_URL, Duration::from_secs(10)).unwrap();
        let err = client.call::<serde_json::Value>("auth.test", &[]).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Slack(_)));
    }
}
