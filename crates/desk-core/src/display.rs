//! Display conventions shared by every rendering path.
//!
//! Timestamps are stored in UTC and shown in a fixed local offset
//! (`board.utc_offset_minutes`) as `dd/mm/YYYY HH:MM`.

use chrono::{DateTime, FixedOffset, Utc};

use crate::errors::CoreError;

/// Label shown when an identity cannot be resolved to a name.
pub const UNRESOLVED_NAME: &str = "–";

/// Cell text for absent values (dates, SLA status).
pub const EMPTY_CELL: &str = "-";

/// Timestamp layout used in tables, exports, and thread views.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Build a fixed display offset from minutes east of UTC.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the offset is outside ±24h.
pub fn display_offset(minutes: i32) -> Result<FixedOffset, CoreError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| CoreError::Validation(format!("UTC offset out of range: {minutes} minutes")))
}

/// Format an optional UTC timestamp in the display offset, `-` when absent.
#[must_use]
pub fn format_timestamp(ts: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    ts.map_or_else(
        || EMPTY_CELL.to_string(),
        |ts| ts.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
    )
}
