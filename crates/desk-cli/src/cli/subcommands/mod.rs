pub mod auth;
pub mod export;

pub use auth::AuthCommands;
pub use export::{ExportFormat, ExportKind};

use clap::ValueEnum;

/// Which people list `desk people` prints.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PeopleKind {
    Responsibles,
    Capturers,
}
