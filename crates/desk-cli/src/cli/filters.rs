use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use desk_config::BoardConfig;
use desk_db::{Preset, SlaFilter, TicketFilter};

/// Named filter shortcut, as typed on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PresetArg {
    InProgress,
    Finished,
    OutsideSla,
    Changed,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::InProgress => Self::InProgress,
            PresetArg::Finished => Self::Finished,
            PresetArg::OutsideSla => Self::OutsideSla,
            PresetArg::Changed => Self::Changed,
        }
    }
}

/// Ticket filter flags shared by the data commands.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Stored status (case-insensitive).
    #[arg(long)]
    pub status: Option<String>,
    /// Responsible Slack ID.
    #[arg(long)]
    pub responsible: Option<String>,
    /// Opened on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Opened on or before this date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Capturer Slack ID.
    #[arg(long)]
    pub captured_by: Option<String>,
    /// Only tickets whose stored SLA status is "outside".
    #[arg(long)]
    pub outside_sla: bool,
    /// Only tickets with edits or reopenings.
    #[arg(long, conflicts_with = "unchanged")]
    pub changed: bool,
    /// Only tickets without edits or reopenings.
    #[arg(long)]
    pub unchanged: bool,
    /// Shortcut applied on top of the other flags.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_filter(&self, board: &BoardConfig) -> TicketFilter {
        let changed = if self.changed {
            Some(true)
        } else if self.unchanged {
            Some(false)
        } else {
            None
        };
        let filter = TicketFilter {
            status: self.status.clone().filter(|s| !s.trim().is_empty()),
            responsible: self.responsible.clone().filter(|s| !s.trim().is_empty()),
            opened_from: self.from,
            opened_to: self.to,
            captured_by: self.captured_by.clone().filter(|s| !s.trim().is_empty()),
            sla: self.outside_sla.then_some(SlaFilter::Outside),
            changed,
        };
        match self.preset {
            Some(preset) => Preset::from(preset).apply(filter, board),
            None => filter,
        }
    }
}
