use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Tickets(args) => commands::tickets::handle(&args, ctx, flags).await,
        Commands::Ticket(args) => commands::ticket::handle(&args, ctx, flags).await,
        Commands::Metrics(args) => commands::metrics::handle(&args, ctx, flags).await,
        Commands::Changes(args) => commands::changes::handle(&args, ctx, flags).await,
        Commands::People(args) => commands::people::handle(&args, ctx, flags).await,
        Commands::Thread(args) => commands::thread::handle(&args, ctx, flags).await,
        Commands::Resolve(args) => commands::resolve::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}
