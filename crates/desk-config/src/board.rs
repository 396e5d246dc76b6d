//! Board display and metric settings.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    20
}

const fn default_sla_days() -> i64 {
    2
}

/// Display offset in minutes east of UTC (UTC-3).
const fn default_utc_offset_minutes() -> i32 {
    -180
}

fn default_in_progress_status() -> String {
    "In Progress".to_string()
}

fn default_finished_status() -> String {
    "Done".to_string()
}

fn default_outside_sla_value() -> String {
    "outside".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Tickets per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whole days a ticket may stay open and still be within SLA.
    #[serde(default = "default_sla_days")]
    pub sla_days: i64,

    /// Offset used when formatting timestamps.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Stored status value counted as "in progress".
    #[serde(default = "default_in_progress_status")]
    pub in_progress_status: String,

    /// Stored status value counted as "finished".
    #[serde(default = "default_finished_status")]
    pub finished_status: String,

    /// Stored `sla_status` value meaning the ticket breached its SLA.
    #[serde(default = "default_outside_sla_value")]
    pub outside_sla_value: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sla_days: default_sla_days(),
            utc_offset_minutes: default_utc_offset_minutes(),
            in_progress_status: default_in_progress_status(),
            finished_status: default_finished_status(),
            outside_sla_value: default_outside_sla_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = BoardConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.sla_days, 2);
        assert_eq!(config.utc_offset_minutes, -180);
        assert_eq!(config.outside_sla_value, "outside");
    }
}
