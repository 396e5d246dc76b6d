//! Unified change table built from edits and reopenings.

use std::collections::HashMap;

use desk_core::entities::{ActorCount, ChangeEvent, EditEvent, ReopeningEvent};

/// Merge edits and reopenings into change rows, edits first.
#[must_use]
pub fn fold_changes(edits: Vec<EditEvent>, reopenings: Vec<ReopeningEvent>) -> Vec<ChangeEvent> {
    edits
        .into_iter()
        .map(ChangeEvent::from)
        .chain(reopenings.into_iter().map(ChangeEvent::from))
        .collect()
}

/// Newest first; rows without a timestamp go last. Stable for equal times.
pub fn sort_latest_first(changes: &mut [ChangeEvent]) {
    changes.sort_by(|a, b| match (a.when, b.when) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// The `n` actors with the most changes, ties broken by name.
#[must_use]
pub fn top_actors(changes: &[ChangeEvent], n: usize) -> Vec<ActorCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for change in changes {
        *counts.entry(change.actor.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<ActorCount> = counts
        .into_iter()
        .map(|(actor, changes)| ActorCount {
            actor: actor.to_string(),
            changes,
        })
        .collect();
    ranked.sort_by(|a, b| b.changes.cmp(&a.changes).then_with(|| a.actor.cmp(&b.actor)));
    ranked.truncate(n);
    ranked
}
