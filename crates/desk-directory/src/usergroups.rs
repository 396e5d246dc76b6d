//! `usergroups.list` lookups.

use serde::Deserialize;

use crate::{SlackClient, error::DirectoryError};

#[derive(Deserialize)]
struct UserGroupsResponse {
    #[serde(default)]
    usergroups: Vec<SlackUserGroup>,
}

#[derive(Deserialize)]
struct SlackUserGroup {
    id: String,
    #[serde(default)]
    name: String,
}

impl SlackClient {
    /// Every user group in the workspace as `(id, name)` pairs.
    /// Groups with a blank name are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport or API failure.
    pub async fn group_names(&self) -> Result<Vec<(String, String)>, DirectoryError> {
        let data: UserGroupsResponse = self.call("usergroups.list", &[]).await?;
        Ok(into_pairs(data))
    }
}

fn into_pairs(data: UserGroupsResponse) -> Vec<(String, String)> {
    data.usergroups
        .into_iter()
        .filter(|g| !g.name.trim().is_empty())
        .map(|g| (g.id, g.name))
        .collect()
}
