use anyhow::Context;
use desk_directory::thread::{ThreadMessage, load_thread};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ThreadArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ThreadResponse {
    channel: String,
    ts: String,
    messages: Vec<ThreadMessage>,
}

pub async fn handle(args: &ThreadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.config.require_slack()?;
    let messages = load_thread(ctx.slack(), ctx.resolver(), &args.channel, &args.ts, ctx.service.offset())
        .await
        .with_context(|| format!("failed to load thread {}/{}", args.channel, args.ts))?;
    output(
        &ThreadResponse {
            channel: args.channel.clone(),
            ts: args.ts.clone(),
            messages,
        },
        flags.format,
    )
}
