//! # desk-directory
//!
//! Slack directory access for deskboard.
//!
//! - [`SlackClient`] reads `users.info`, `usergroups.list`, `bots.info`, and
//!   `conversations.replies`.
//! - [`IdentityResolver`] turns opaque identifiers into display names, with a
//!   per-resolver cache and a placeholder for anything it cannot resolve.
//! - [`thread`] shapes a conversation thread for display.

pub mod bots;
pub mod classify;
pub mod replies;
pub mod resolver;
pub mod thread;
pub mod usergroups;
pub mod users;

mod error;
mod http;
mod slack;

pub use classify::IdentityKind;
pub use error::DirectoryError;
pub use replies::SlackMessage;
pub use resolver::{IdentityResolver, NameSource, Resolution, UnresolvedReason};
pub use slack::{DEFAULT_API_BASE_URL, SlackClient};

use std::future::Future;

/// Lookup operations the resolver needs from an identity directory.
pub trait Directory: Send + Sync {
    /// Display name of an individual user.
    fn user_name(&self, id: &str) -> impl Future<Output = Result<String, DirectoryError>> + Send;

    /// All groups as `(id, name)` pairs.
    fn group_names(&self) -> impl Future<Output = Result<Vec<(String, String)>, DirectoryError>> + Send;

    /// Name of a bot integration.
    fn bot_name(&self, id: &str) -> impl Future<Output = Result<String, DirectoryError>> + Send;
}

impl Directory for SlackClient {
    fn user_name(&self, id: &str) -> impl Future<Output = Result<String, DirectoryError>> + Send {
        Self::user_name(self, id)
    }

    fn group_names(&self) -> impl Future<Output = Result<Vec<(String, String)>, DirectoryError>> + Send {
        Self::group_names(self)
    }

    fn bot_name(&self, id: &str) -> impl Future<Output = Result<String, DirectoryError>> + Send {
        Self::bot_name(self, id)
    }
}
