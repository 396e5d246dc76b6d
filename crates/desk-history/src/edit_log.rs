//! Edit log: a JSON object of `{"field": {"de": old, "para": new}}`.
//!
//! `from`/`to` are read when `de`/`para` are absent. Fields come out in the
//! order they appear in the document.

use chrono::{DateTime, Utc};
use desk_core::entities::{EditEvent, TicketContext};
use serde_json::Value;

/// Expand a ticket's edit log into one event per changed field.
///
/// Every event carries the ticket's last editor and last edit time, since the
/// log itself stores neither. Invalid JSON or a non-object top level yields no
/// events; entries that are not objects are skipped.
#[must_use]
pub fn parse_edit_log(
    log: Option<&str>,
    context: &TicketContext,
    actor: &str,
    edited_at: Option<DateTime<Utc>>,
) -> Vec<EditEvent> {
    let Some(log) = log.map(str::trim).filter(|log| !log.is_empty()) else {
        return Vec::new();
    };

    let entries = match serde_json::from_str::<Value>(log) {
        Ok(Value::Object(entries)) => entries,
        Ok(other) => {
            tracing::debug!(ticket_id = context.ticket_id, kind = json_kind(&other), "edit log is not an object");
            return Vec::new();
        }
        Err(error) => {
            tracing::debug!(ticket_id = context.ticket_id, %error, "edit log is not valid JSON");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(field, change)| {
            let Value::Object(change) = change else {
                tracing::trace!(ticket_id = context.ticket_id, field = %field, "skipping non-object edit entry");
                return None;
            };
            let side = |primary: &str, alias: &str| {
                change
                    .get(primary)
                    .or_else(|| change.get(alias))
                    .and_then(value_text)
            };
            Some(EditEvent {
                ticket_id: context.ticket_id,
                old_value: side("de", "from"),
                new_value: side("para", "to"),
                field,
                actor: actor.to_string(),
                edited_at,
                responsible_name: context.responsible_name.clone(),
                opened_at: context.opened_at,
            })
        })
        .collect()
}

/// Text of a logged value; `null` is absent, non-strings use their JSON form.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
