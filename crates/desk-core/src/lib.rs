//! # desk-core
//!
//! Core types and helpers shared across deskboard crates:
//! - Entity structs for tickets and the change events projected from them
//! - SLA and change-kind enums
//! - Day-count SLA math
//! - Display formatting for timestamps and unresolved names
//! - Cross-cutting error types

pub mod display;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod sla;
