use desk_directory::Resolution;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ResolvedName {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
}

pub async fn handle(args: &ResolveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut names = Vec::with_capacity(args.ids.len());
    for id in &args.ids {
        let resolution = ctx.resolver().resolve_detailed(id).await;
        names.push(ResolvedName {
            id: id.clone(),
            name: resolution.clone().label(),
            resolution: args.detailed.then_some(resolution),
        });
    }
    output(&names, flags.format)
}
