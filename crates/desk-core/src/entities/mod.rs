//! Entity structs for deskboard.
//!
//! `TicketView` and `TicketPage` are display projections of stored tickets.
//! Reopening, edit, and change events are request-scoped projections of a
//! ticket's audit fields and are never persisted.

mod change;
mod edit;
mod reopening;
mod ticket;

pub use change::{ActorCount, ChangeEvent};
pub use edit::EditEvent;
pub use reopening::{ReopeningEvent, TicketContext};
pub use ticket::{DashboardMetrics, TicketPage, TicketView};
