use clap::ValueEnum;

/// What `desk export` writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportKind {
    Tickets,
    Changes,
}

impl ExportKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tickets => "tickets",
            Self::Changes => "changes",
        }
    }
}

/// Export file format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    /// One pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }
}

/// `export_{kind}.{ext}` unless a path was given.
#[must_use]
pub fn default_export_path(kind: ExportKind, format: ExportFormat) -> String {
    format!("export_{}.{}", kind.as_str(), format.extension())
}
