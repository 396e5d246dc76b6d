use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::EMPTY_CELL;
use crate::entities::{EditEvent, ReopeningEvent};
use crate::enums::ChangeKind;

/// Field label used for reopening rows in the unified change table.
pub const REOPENING_FIELD: &str = "reopening";

/// A unified change-history row: either a field edit or a reopening.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeEvent {
    pub ticket_id: i64,
    pub kind: ChangeKind,
    pub when: Option<DateTime<Utc>>,
    pub actor: String,
    pub description: String,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub responsible_name: String,
    pub opened_at: Option<DateTime<Utc>>,
}

impl From<EditEvent> for ChangeEvent {
    fn from(edit: EditEvent) -> Self {
        let description = format!(
            "{}: {} → {}",
            edit.field,
            edit.old_value.as_deref().unwrap_or(EMPTY_CELL),
            edit.new_value.as_deref().unwrap_or(EMPTY_CELL),
        );
        Self {
            ticket_id: edit.ticket_id,
            kind: ChangeKind::Edit,
            when: edit.edited_at,
            actor: edit.actor,
            description,
            field: edit.field,
            old_value: edit.old_value,
            new_value: edit.new_value,
            responsible_name: edit.responsible_name,
            opened_at: edit.opened_at,
        }
    }
}

impl From<ReopeningEvent> for ChangeEvent {
    fn from(reopening: ReopeningEvent) -> Self {
        Self {
            ticket_id: reopening.ticket_id,
            kind: ChangeKind::Reopening,
            when: reopening
                .occurred_on
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc()),
            actor: reopening.actor,
            description: reopening.description,
            field: REOPENING_FIELD.to_string(),
            old_value: None,
            new_value: None,
            responsible_name: reopening.responsible_name,
            opened_at: reopening.opened_at,
        }
    }
}

/// Number of changes attributed to one actor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorCount {
    pub actor: String,
    pub changes: usize,
}
