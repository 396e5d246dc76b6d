use clap::{Args, Subcommand};

use crate::cli::FilterArgs;
use crate::cli::subcommands::{AuthCommands, ExportFormat, ExportKind, PeopleKind};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Paged ticket table.
    Tickets(TicketsArgs),
    /// One ticket with its change history.
    Ticket(TicketArgs),
    /// SLA and status counters.
    Metrics(MetricsArgs),
    /// Edits and reopenings, latest first.
    Changes(ChangesArgs),
    /// Distinct people on the matching tickets.
    People(PeopleArgs),
    /// Slack thread of a ticket.
    Thread(ThreadArgs),
    /// Resolve Slack IDs to display names.
    Resolve(ResolveArgs),
    /// Write tickets or changes to a file.
    Export(ExportArgs),
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}

/// Arguments for `desk tickets`.
#[derive(Clone, Debug, Args)]
pub struct TicketsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page (defaults to `board.page_size`).
    #[arg(long)]
    pub per_page: Option<u32>,
}

/// Arguments for `desk ticket`.
#[derive(Clone, Debug, Args)]
pub struct TicketArgs {
    pub id: i64,
}

/// Arguments for `desk metrics`.
#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for `desk changes`.
#[derive(Clone, Debug, Args)]
pub struct ChangesArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Show the N most active actors instead of the events.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for `desk people`.
#[derive(Clone, Debug, Args)]
pub struct PeopleArgs {
    #[arg(value_enum)]
    pub kind: PeopleKind,
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for `desk thread`.
#[derive(Clone, Debug, Args)]
pub struct ThreadArgs {
    /// Channel ID.
    pub channel: String,
    /// Thread timestamp of the original message.
    pub ts: String,
}

/// Arguments for `desk resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Slack IDs (U…, W…, S…, B…).
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Include where each name came from.
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for `desk export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub kind: ExportKind,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// File format.
    #[arg(long = "as", value_enum, default_value = "json")]
    pub export_format: ExportFormat,
    /// Destination (defaults to `export_{kind}.{ext}`).
    #[arg(short, long)]
    pub output: Option<String>,
}
