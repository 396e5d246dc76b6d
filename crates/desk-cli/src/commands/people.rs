use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeopleArgs;
use crate::cli::subcommands::PeopleKind;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PeopleResponse {
    people: Vec<String>,
}

pub async fn handle(args: &PeopleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = args.filters.to_filter(&ctx.config.board);
    let people = match args.kind {
        PeopleKind::Responsibles => ctx.service.responsibles(&filter).await?,
        PeopleKind::Capturers => ctx.service.capturers(&filter).await?,
    };
    output(&PeopleResponse { people }, flags.format)
}
