use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One changed field from a ticket's JSON edit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditEvent {
    pub ticket_id: i64,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub actor: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub responsible_name: String,
    pub opened_at: Option<DateTime<Utc>>,
}
