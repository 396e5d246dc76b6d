//! Resolver behavior against an in-process directory that counts lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;

use desk_directory::{
    Directory, DirectoryError, IdentityResolver, NameSource, Resolution, UnresolvedReason,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Failing,
    Slow,
}

struct FakeDirectory {
    users: HashMap<String, String>,
    groups: Vec<(String, String)>,
    bots: HashMap<String, String>,
    mode: Mode,
    user_calls: AtomicUsize,
    group_calls: AtomicUsize,
    bot_calls: AtomicUsize,
}

impl FakeDirectory {
    fn new(mode: Mode) -> Self {
        Self {
            users: HashMap::from([
                ("U024BE7LH".to_string(), "Jane Doe".to_string()),
                ("W012A3CDE".to_string(), "Grid User".to_string()),
            ]),
            groups: vec![
                ("S0614TZR7".to_string(), "Support".to_string()),
                ("S08STJCNMHR".to_string(), "Upstream Sales".to_string()),
            ],
            bots: HashMap::from([("B01234567".to_string(), "deploybot".to_string())]),
            mode,
            user_calls: AtomicUsize::new(0),
            group_calls: AtomicUsize::new(0),
            bot_calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
            + self.group_calls.load(Ordering::SeqCst)
            + self.bot_calls.load(Ordering::SeqCst)
    }

    async fn behave(&self) -> Result<(), DirectoryError> {
        match self.mode {
            Mode::Normal => Ok(()),
            Mode::Failing => Err(DirectoryError::Api {
                status: 500,
                message: "upstream down".into(),
            }),
            Mode::Slow => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            }
        }
    }
}

impl Directory for FakeDirectory {
    async fn user_name(&self, id: &str) -> Result<String, DirectoryError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.behave().await?;
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::Slack("user_not_found".into()))
    }

    async fn group_names(&self) -> Result<Vec<(String, String)>, DirectoryError> {
        self.group_calls.fetch_add(1, Ordering::SeqCst);
        self.behave().await?;
        Ok(self.groups.clone())
    }

    async fn bot_name(&self, id: &str) -> Result<String, DirectoryError> {
        self.bot_calls.fetch_add(1, Ordering::SeqCst);
        self.behave().await?;
        self.bots
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.into()))
    }
}

fn resolver(mode: Mode) -> IdentityResolver<FakeDirectory> {
    IdentityResolver::new(FakeDirectory::new(mode)).with_timeout(Duration::from_millis(50))
}

#[tokio::test]
async fn resolves_user_then_serves_from_cache() {
    let resolver = resolver(Mode::Normal);

    assert_eq!(resolver.resolve("U024BE7LH").await, "Jane Doe");
    assert_eq!(resolver.resolve("U024BE7LH").await, "Jane Doe");
    assert_eq!(resolver.directory().user_calls.load(Ordering::SeqCst), 1);

    assert_eq!(
        resolver.resolve_detailed("U024BE7LH").await,
        Resolution::Resolved {
            name: "Jane Doe".into(),
            source: NameSource::Cache
        }
    );
}

#[tokio::test]
async fn padded_id_shares_cache_entry() {
    let resolver = resolver(Mode::Normal);

    assert_eq!(resolver.resolve("U024BE7LH").await, "Jane Doe");
    assert_eq!(resolver.resolve("  U024BE7LH \n").await, "Jane Doe");
    assert_eq!(resolver.cache_len(), 1);
    assert_eq!(resolver.cached("U024BE7LH").as_deref(), Some("Jane Doe"));
    assert_eq!(resolver.directory().user_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn enterprise_user_goes_through_user_lookup() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(resolver.resolve("W012A3CDE").await, "Grid User");
    assert_eq!(resolver.directory().user_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn group_listing_memoizes_every_group() {
    let resolver = resolver(Mode::Normal);

    assert_eq!(resolver.resolve("S0614TZR7").await, "Support");
    assert_eq!(resolver.cache_len(), 2);
    assert_eq!(resolver.cached("S08STJCNMHR").as_deref(), Some("Upstream Sales"));
    assert_eq!(resolver.resolve("S08STJCNMHR").await, "Upstream Sales");
    assert_eq!(resolver.directory().group_calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.directory().user_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(
        resolver.resolve_detailed("S99999999").await,
        Resolution::Unresolved(UnresolvedReason::NotFound)
    );
}

#[tokio::test]
async fn bot_lookup() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(resolver.resolve("B01234567").await, "deploybot");
    assert_eq!(resolver.resolve("B00000000").await, "–");
    assert_eq!(resolver.directory().bot_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn override_wins_over_directory() {
    for mode in [Mode::Normal, Mode::Failing, Mode::Slow] {
        let resolver = resolver(mode).with_overrides(HashMap::from([(
            "S08STJCNMHR".to_string(),
            "Sales Team".to_string(),
        )]));

        assert_eq!(resolver.resolve("S08STJCNMHR").await, "Sales Team");
        assert_eq!(
            resolver.resolve_detailed("S08STJCNMHR").await,
            Resolution::Resolved {
                name: "Sales Team".into(),
                source: NameSource::Override
            }
        );
        assert_eq!(resolver.directory().calls(), 0);
    }
}

#[tokio::test]
async fn blank_and_absent_ids_are_placeholders() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(resolver.resolve("").await, "–");
    assert_eq!(resolver.resolve("   ").await, "–");
    assert_eq!(resolver.resolve_opt(None).await, "–");
    assert_eq!(
        resolver.resolve_detailed("").await,
        Resolution::Unresolved(UnresolvedReason::Empty)
    );
    assert_eq!(resolver.directory().calls(), 0);
}

#[tokio::test]
async fn unrecognized_prefix_is_not_looked_up() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(resolver.resolve("C0123ABCD").await, "–");
    assert_eq!(resolver.resolve("jane@example.com").await, "–");
    assert_eq!(
        resolver.resolve_detailed("C0123ABCD").await,
        Resolution::Unresolved(UnresolvedReason::Unrecognized)
    );
    assert_eq!(resolver.directory().calls(), 0);
}

#[tokio::test]
async fn upstream_error_degrades_and_is_not_cached() {
    let resolver = resolver(Mode::Failing);

    assert_eq!(resolver.resolve("U024BE7LH").await, "–");
    assert!(matches!(
        resolver.resolve_detailed("U024BE7LH").await,
        Resolution::Unresolved(UnresolvedReason::LookupFailed(_))
    ));
    assert_eq!(resolver.cache_len(), 0);
    assert_eq!(resolver.directory().user_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn timeout_degrades_to_placeholder() {
    let resolver = resolver(Mode::Slow);
    assert_eq!(
        resolver.resolve_detailed("U024BE7LH").await,
        Resolution::Unresolved(UnresolvedReason::TimedOut)
    );
    assert_eq!(resolver.resolve("S0614TZR7").await, "–");
    assert_eq!(resolver.cache_len(), 0);
}

#[tokio::test]
async fn missing_user_degrades_to_placeholder() {
    let resolver = resolver(Mode::Normal);
    assert_eq!(resolver.resolve("U99999999").await, "–");
}

#[tokio::test]
async fn concurrent_resolution_is_consistent() {
    let resolver = Arc::new(resolver(Mode::Normal));
    let mut handles = Vec::new();
    for _ in 0..16 {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::spawn(async move { resolver.resolve("U024BE7LH").await }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), "Jane Doe");
    }
    assert_eq!(resolver.cached("U024BE7LH").as_deref(), Some("Jane Doe"));
    assert_eq!(resolver.cache_len(), 1);
}

#[tokio::test]
async fn fresh_resolvers_do_not_share_cache() {
    let first = resolver(Mode::Normal);
    first.resolve("U024BE7LH").await;
    let second = resolver(Mode::Normal);
    assert_eq!(second.cache_len(), 0);
}
