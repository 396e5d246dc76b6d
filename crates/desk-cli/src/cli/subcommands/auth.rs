use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in through the browser.
    Login,
    /// Forget the stored session.
    Logout,
    /// Show the current session.
    Status,
}
