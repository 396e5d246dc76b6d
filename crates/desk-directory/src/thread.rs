//! Thread view: a Slack conversation thread shaped for display.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Utc};
use desk_core::display::format_timestamp;
use regex::Regex;
use serde::Serialize;

use crate::{Directory, DirectoryError, IdentityResolver, Resolution, SlackClient, SlackMessage};

/// Replies fetched per thread.
pub const THREAD_PAGE_LIMIT: u32 = 200;

/// One message of a thread, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadMessage {
    pub ts: String,
    pub author: String,
    pub posted_at: String,
    pub text: String,
    pub is_original: bool,
}

/// Fetch the thread at `channel`/`ts` and shape it for display.
///
/// # Errors
///
/// Returns [`DirectoryError`] when the fetch fails. Name lookups never fail.
pub async fn load_thread<D: Directory>(
    client: &SlackClient,
    resolver: &IdentityResolver<D>,
    channel: &str,
    ts: &str,
    offset: FixedOffset,
) -> Result<Vec<ThreadMessage>, DirectoryError> {
    let messages = client.conversation_replies(channel, ts, THREAD_PAGE_LIMIT).await?;
    tracing::debug!(channel, ts, count = messages.len(), "thread fetched");
    Ok(shape_thread(messages, ts, resolver, offset).await)
}

/// Order messages chronologically and resolve authors and mentions.
pub async fn shape_thread<D: Directory>(
    mut messages: Vec<SlackMessage>,
    thread_ts: &str,
    resolver: &IdentityResolver<D>,
    offset: FixedOffset,
) -> Vec<ThreadMessage> {
    messages.sort_by(|a, b| {
        ts_seconds(&a.ts)
            .partial_cmp(&ts_seconds(&b.ts))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut shaped = Vec::with_capacity(messages.len());
    for message in messages {
        let author_id = message.user.as_deref().or(message.bot_id.as_deref());
        shaped.push(ThreadMessage {
            author: resolver.resolve_opt(author_id).await,
            posted_at: format_timestamp(ts_to_datetime(&message.ts), offset),
            text: format_message_text(&message.text, resolver).await,
            is_original: message.ts == thread_ts,
            ts: message.ts,
        });
    }
    shaped
}

fn ts_seconds(ts: &str) -> f64 {
    ts.parse().unwrap_or(0.0)
}

/// Slack ts (`seconds.micros`) as a UTC timestamp.
#[must_use]
pub fn ts_to_datetime(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = ts.split_once('.').unwrap_or((ts, "0"));
    let secs: i64 = secs.parse().ok()?;
    let micros: u32 = format!("{frac:0<6}").get(..6)?.parse().ok()?;
    DateTime::from_timestamp(secs, micros * 1_000)
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^<>]+)>").expect("markup regex is valid"))
}

/// Render Slack markup as plain text.
///
/// `<@U…>` becomes `@Name`, `<!subteam^S…|@handle>` becomes `@Group`; an
/// unresolved mention keeps its label.
/// `<url|label>` becomes `label`, `<url>` stays `url`, and the three escaped
/// entities are restored.
pub async fn format_message_text<D: Directory>(text: &str, resolver: &IdentityResolver<D>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in markup_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        let inner = inner.as_str();
        let (target, label) = inner
            .split_once('|')
            .map_or((inner, None), |(target, label)| (target, Some(label)));

        let mention = match target.strip_prefix('@') {
            Some(user_id) => Some(user_id),
            None => target.strip_prefix("!subteam^"),
        };
        if let Some(id) = mention {
            out.push('@');
            out.push_str(&mention_name(resolver, id, label).await);
        } else if let Some(special) = target.strip_prefix('!') {
            if let Some(label) = label {
                out.push_str(label);
            } else {
                out.push('@');
                out.push_str(special);
            }
        } else {
            out.push_str(label.unwrap_or(target));
        }
    }
    out.push_str(&text[last..]);
    unescape(&out)
}

/// Resolved name, else the label Slack sent, else the placeholder.
async fn mention_name<D: Directory>(
    resolver: &IdentityResolver<D>,
    id: &str,
    label: Option<&str>,
) -> String {
    match resolver.resolve_detailed(id).await {
        Resolution::Resolved { name, .. } => name,
        unresolved => {
            let label = label
                .map(|l| l.trim_start_matches('@'))
                .filter(|l| !l.trim().is_empty());
            match label {
                Some(label) => label.to_string(),
                None => unresolved.label(),
            }
        }
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}
