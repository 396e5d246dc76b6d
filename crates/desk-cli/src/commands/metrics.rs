use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetricsArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &MetricsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = args.filters.to_filter(&ctx.config.board);
    let metrics = ctx.service.metrics(&filter).await?;
    output(&metrics, flags.format)
}
