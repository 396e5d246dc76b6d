//! Identity resolution with a per-resolver cache.
//!
//! Lookup order: blank id → placeholder, override table, cache, then the
//! directory path chosen by [`IdentityKind`]. Successful lookups are cached
//! for the resolver's lifetime and never refreshed. Failures and timeouts
//! degrade to [`UNRESOLVED_NAME`] and are not cached.
//!
//! Ids are trimmed before the override check and the cache, so ` U1 ` and
//! `U1` share one entry. Override keys are matched as given.
//!
//! The cache is a `DashMap`; no shard guard is held across an await. Two
//! concurrent misses on the same id may both hit the directory, and the
//! second write wins with the same value.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use dashmap::DashMap;
use desk_core::display::UNRESOLVED_NAME;
use serde::Serialize;

use crate::{Directory, DirectoryError, IdentityKind, SlackClient};

/// Default timeout around each directory lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a resolved name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    Override,
    Cache,
    Directory,
}

/// Why an identifier resolved to the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum UnresolvedReason {
    /// Blank or absent identifier.
    Empty,
    /// Prefix not recognized; no lookup attempted.
    Unrecognized,
    /// The directory answered but had no name for the id.
    NotFound,
    /// Transport, API, or payload error.
    LookupFailed(String),
    /// The lookup exceeded the configured timeout.
    TimedOut,
}

/// Outcome of resolving one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Resolved { name: String, source: NameSource },
    Unresolved(UnresolvedReason),
}

impl Resolution {
    /// Display label: the name, or the placeholder.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Resolved { name, .. } => name,
            Self::Unresolved(_) => UNRESOLVED_NAME.to_string(),
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Resolves Slack identifiers to display names.
pub struct IdentityResolver<D = SlackClient> {
    directory: D,
    overrides: HashMap<String, String>,
    cache: DashMap<String, String>,
    timeout: Duration,
}

impl<D: Directory> IdentityResolver<D> {
    /// Resolver over `directory` with no overrides and the default timeout.
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            overrides: HashMap::new(),
            cache: DashMap::new(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Static id → name table that wins over any lookup.
    #[must_use]
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Display name for `id`, or the placeholder. Never fails.
    pub async fn resolve(&self, id: &str) -> String {
        self.resolve_detailed(id).await.label()
    }

    /// Like [`Self::resolve`]; `None` yields the placeholder.
    pub async fn resolve_opt(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.resolve(id).await,
            None => UNRESOLVED_NAME.to_string(),
        }
    }

    /// Resolve with the source of the name or the reason it is missing.
    pub async fn resolve_detailed(&self, id: &str) -> Resolution {
        let id = id.trim();
        if id.is_empty() {
            return Resolution::Unresolved(UnresolvedReason::Empty);
        }
        if let Some(name) = self.overrides.get(id) {
            return Resolution::Resolved {
                name: name.clone(),
                source: NameSource::Override,
            };
        }
        if let Some(name) = self.cached(id) {
            return Resolution::Resolved {
                name,
                source: NameSource::Cache,
            };
        }

        let kind = IdentityKind::classify(id);
        let looked_up = match kind {
            IdentityKind::User => self.bounded(self.directory.user_name(id)).await,
            IdentityKind::Bot => self.bounded(self.directory.bot_name(id)).await,
            IdentityKind::Group => self.lookup_group(id).await,
            IdentityKind::Unknown => {
                tracing::debug!(id, "unrecognized identifier, not looked up");
                return Resolution::Unresolved(UnresolvedReason::Unrecognized);
            }
        };

        match looked_up {
            Ok(name) => {
                self.cache.insert(id.to_string(), name.clone());
                Resolution::Resolved {
                    name,
                    source: NameSource::Directory,
                }
            }
            Err(reason) => {
                match &reason {
                    UnresolvedReason::LookupFailed(error) => {
                        tracing::warn!(id, %kind, error = %error, "identity lookup failed");
                    }
                    other => tracing::debug!(id, %kind, reason = ?other, "identity unresolved"),
                }
                Resolution::Unresolved(reason)
            }
        }
    }

    /// Cached name for `id`, if any.
    pub fn cached(&self, id: &str) -> Option<String> {
        self.cache.get(id).map(|entry| entry.value().clone())
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Fetch the group listing, memoize every group, then pick `id`.
    async fn lookup_group(&self, id: &str) -> Result<String, UnresolvedReason> {
        let groups = self.bounded(self.directory.group_names()).await?;
        let mut found = None;
        for (group_id, name) in groups {
            if group_id == id {
                found = Some(name.clone());
            }
            self.cache.insert(group_id, name);
        }
        found.ok_or(UnresolvedReason::NotFound)
    }

    async fn bounded<T, F>(&self, lookup: F) -> Result<T, UnresolvedReason>
    where
        F: Future<Output = Result<T, DirectoryError>>,
    {
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(DirectoryError::NotFound(_))) => Err(UnresolvedReason::NotFound),
            Ok(Err(e)) => Err(UnresolvedReason::LookupFailed(e.to_string())),
            Err(_) => Err(UnresolvedReason::TimedOut),
        }
    }
}
