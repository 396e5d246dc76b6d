//! `users.info` lookups.

use serde::Deserialize;

use crate::{SlackClient, error::DirectoryError};

#[derive(Deserialize)]
struct UserInfoResponse {
    user: SlackUser,
}

#[derive(Deserialize)]
struct SlackUser {
    #[serde(default)]
    real_name: Option<String>,
    #[serde(default)]
    profile: Option<UserProfile>,
}

#[derive(Deserialize)]
struct UserProfile {
    #[serde(default)]
    real_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl SlackUser {
    /// First non-blank of `real_name`, `profile.real_name`, `profile.display_name`.
    fn best_name(self) -> Option<String> {
        let (profile_real, profile_display) = self
            .profile
            .map_or((None, None), |p| (p.real_name, p.display_name));
        [self.real_name, profile_real, profile_display]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
    }
}

impl SlackClient {
    /// Display name of a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport or API failure, and
    /// [`DirectoryError::NotFound`] when the user has no usable name.
    pub async fn user_name(&self, user_id: &str) -> Result<String, DirectoryError> {
        let data: UserInfoResponse = self.call("users.info", &[("user", user_id)]).await?;
        data.user
            .best_name()
            .ok_or_else(|| DirectoryError::NotFound(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(json: &str) -> Option<String> {
        serde_json::from_str::<UserInfoResponse>(json).unwrap().user.best_name()
    }

    #[test]
    fn prefers_real_name() {
        let name = best(
            r#"{"ok":true,"user":{"id":"U1","real_name":"Jane Doe",
                "profile":{"real_name":"J. Doe","display_name":"jane"}}}"#,
        );
        assert_eq!(name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn falls_back_to_profile_fields() {
        let name = best(r#"{"user":{"real_name":"  ","profile":{"display_name":"jane"}}}"#);
        assert_eq!(name.as_deref(), Some("jane"));
    }

    #[test]
    fn no_usable_name() {
        assert_eq!(best(r#"{"user":{"id":"U1"}}"#), None);
    }
}
