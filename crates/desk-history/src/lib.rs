//! # desk-history
//!
//! Turns a ticket's audit fields into event rows:
//! - [`parse_reopenings`] reads the free-text reopening history
//! - [`parse_edit_log`] expands the JSON edit log into one event per field
//! - [`fold_changes`], [`sort_latest_first`], and [`top_actors`] build the
//!   unified change table
//!
//! Nothing here fails: malformed input is skipped and logged.

pub mod changes;
pub mod edit_log;
pub mod reopening;

pub use changes::{fold_changes, sort_latest_first, top_actors};
pub use edit_log::parse_edit_log;
pub use reopening::{format_reopenings, parse_reopenings};
