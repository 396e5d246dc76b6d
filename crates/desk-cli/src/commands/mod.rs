pub mod auth;
mod changes;
pub mod dispatch;
mod export;
mod metrics;
mod people;
mod resolve;
mod thread;
mod ticket;
mod tickets;
