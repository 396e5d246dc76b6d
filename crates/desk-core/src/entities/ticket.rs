use serde::{Deserialize, Serialize};

use crate::enums::SlaStatus;

/// Display row for one ticket, identities resolved and dates formatted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketView {
    pub id: i64,
    pub ticket_type: Option<String>,
    /// Stored status, lowercased.
    pub status: String,
    pub responsible: String,
    pub requester: String,
    pub captured_by: String,
    pub channel_id: Option<String>,
    pub thread_ts: Option<String>,
    pub opened: String,
    pub closed: String,
    /// Stored SLA status, lowercased, or `-`.
    pub sla: String,
    pub days_to_close: Option<i64>,
    pub sla_by_days: SlaStatus,
    /// True when the ticket has an edit log or a reopening history.
    pub changed: bool,
}

/// One page of tickets plus pagination totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketPage {
    pub tickets: Vec<TicketView>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

/// Headline counters for a filtered ticket set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardMetrics {
    pub total: u64,
    pub in_progress: u64,
    pub finished: u64,
    pub outside_sla: u64,
    pub changed: u64,
    pub within_sla_by_days: u64,
    pub outside_sla_by_days: u64,
    pub mean_days_to_close: Option<f64>,
}
