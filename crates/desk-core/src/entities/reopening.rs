use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Ticket-level context copied onto every event projected from that ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketContext {
    pub ticket_id: i64,
    /// Resolved display name of the ticket's responsible party.
    pub responsible_name: String,
    pub opened_at: Option<DateTime<Utc>>,
}

/// One line of a ticket's reopening history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReopeningEvent {
    pub ticket_id: i64,
    /// `None` when the bracketed date is not a calendar date.
    pub occurred_on: Option<NaiveDate>,
    pub actor: String,
    pub description: String,
    pub responsible_name: String,
    pub opened_at: Option<DateTime<Utc>>,
}
