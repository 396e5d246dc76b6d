//! Read-only repositories over the ticket table.

pub mod tickets;
