use crate::cli::GlobalFlags;
use crate::cli::root_commands::TicketsArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &TicketsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = args.filters.to_filter(&ctx.config.board);
    let per_page = args.per_page.unwrap_or(ctx.config.board.page_size);
    let page = ctx.service.ticket_page(&filter, args.page, per_page).await?;
    tracing::debug!(page = page.page, total = page.total, "ticket page loaded");
    output(&page, flags.format)
}
