use desk_core::entities::{ChangeEvent, TicketView};
use desk_core::errors::CoreError;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TicketArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct TicketDetail {
    #[serde(flatten)]
    ticket: TicketView,
    changes: Vec<ChangeEvent>,
}

pub async fn handle(args: &TicketArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (ticket, changes) = ctx
        .service
        .ticket(args.id)
        .await?
        .ok_or(CoreError::NotFound { id: args.id })?;
    output(&TicketDetail { ticket, changes }, flags.format)
}
