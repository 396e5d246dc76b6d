//! Reopening history: one `[YYYY-MM-DD] actor description` entry per line.

use std::fmt::Write as _;
use std::sync::OnceLock;

use chrono::NaiveDate;
use desk_core::entities::{ReopeningEvent, TicketContext};
use regex::Regex;

/// Date written by [`format_reopenings`] for an event without a date.
pub const MISSING_DATE: &str = "0000-00-00";

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[(\d{4}-\d{2}-\d{2})\]\s+(.+?)\s+(.*)$").expect("reopening regex is valid")
    })
}

/// Parse a reopening history into events, in line order.
///
/// Lines are trimmed and blank lines ignored. A line that does not start with
/// a bracketed date followed by an actor and a description is skipped. The
/// actor is the shortest token run before the first whitespace gap, so
/// `[2025-06-26] Jane Doe reopened` yields actor `Jane`. A bracketed value that
/// is not a calendar date leaves `occurred_on` empty.
#[must_use]
pub fn parse_reopenings(text: Option<&str>, context: &TicketContext) -> Vec<ReopeningEvent> {
    let Some(text) = text else {
        return Vec::new();
    };

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let Some(caps) = line_regex().captures(line) else {
                tracing::trace!(ticket_id = context.ticket_id, line, "skipping reopening line");
                return None;
            };
            let date = &caps[1];
            let occurred_on = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
            if occurred_on.is_none() {
                tracing::debug!(ticket_id = context.ticket_id, date, "invalid reopening date");
            }
            Some(ReopeningEvent {
                ticket_id: context.ticket_id,
                occurred_on,
                actor: caps[2].to_string(),
                description: caps[3].to_string(),
                responsible_name: context.responsible_name.clone(),
                opened_at: context.opened_at,
            })
        })
        .collect()
}

/// Render events back to history lines, one per event.
#[must_use]
pub fn format_reopenings(events: &[ReopeningEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let date = event
            .occurred_on
            .map_or_else(|| MISSING_DATE.to_string(), |d| d.format("%Y-%m-%d").to_string());
        let _ = writeln!(out, "[{date}] {} {}", event.actor, event.description);
    }
    out
}
