mod login;
mod logout;
mod status;

use desk_config::DeskConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `desk auth <subcommand>`.
pub async fn handle(action: &AuthCommands, flags: &GlobalFlags, config: &DeskConfig) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login => login::handle(flags, config).await,
        AuthCommands::Logout => logout::handle(flags),
        AuthCommands::Status => status::handle(flags, config),
    }
}
