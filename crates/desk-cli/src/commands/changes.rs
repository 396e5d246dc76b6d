use chrono::FixedOffset;
use desk_core::display::{UNRESOLVED_NAME, format_timestamp};
use desk_core::entities::ChangeEvent;
use desk_core::enums::ChangeKind;
use desk_history::top_actors;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChangesArgs;
use crate::context::AppContext;
use crate::output::output;

/// Change event with display timestamps.
#[derive(Debug, Serialize)]
struct ChangeRow {
    ticket_id: i64,
    kind: ChangeKind,
    when: String,
    actor: String,
    description: String,
    responsible: String,
    opened: String,
}

impl ChangeRow {
    fn new(change: ChangeEvent, offset: FixedOffset) -> Self {
        let actor = if change.actor.trim().is_empty() {
            UNRESOLVED_NAME.to_string()
        } else {
            change.actor
        };
        Self {
            ticket_id: change.ticket_id,
            kind: change.kind,
            when: format_timestamp(change.when, offset),
            actor,
            description: change.description,
            responsible: change.responsible_name,
            opened: format_timestamp(change.opened_at, offset),
        }
    }
}

pub async fn handle(args: &ChangesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = args.filters.to_filter(&ctx.config.board);
    let changes = ctx.service.changes(&filter).await?;

    if let Some(n) = args.top {
        return output(&top_actors(&changes, n), flags.format);
    }

    let offset = ctx.service.offset();
    let rows = changes
        .into_iter()
        .map(|change| ChangeRow::new(change, offset))
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
