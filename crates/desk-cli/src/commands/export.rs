use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::cli::subcommands::export::default_export_path;
use crate::cli::subcommands::{ExportFormat, ExportKind};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    kind: &'static str,
    format: &'static str,
    path: String,
    rows: usize,
}

pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = args.filters.to_filter(&ctx.config.board);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_export_path(args.kind, args.export_format));

    let rows = match args.kind {
        ExportKind::Tickets => {
            let tickets = ctx.service.ticket_views(&filter).await?;
            write_export(Path::new(&path), &tickets, args.export_format)?
        }
        ExportKind::Changes => {
            let changes = ctx.service.changes(&filter).await?;
            write_export(Path::new(&path), &changes, args.export_format)?
        }
    };
    tracing::info!(path = %path, rows, "export written");

    output(
        &ExportResponse {
            kind: args.kind.as_str(),
            format: args.export_format.extension(),
            path,
            rows,
        },
        flags.format,
    )
}

/// Write `items` to `path` and return how many were written.
fn write_export<T: Serialize>(path: &Path, items: &[T], format: ExportFormat) -> anyhow::Result<usize> {
    match format {
        ExportFormat::Json => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, items)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        ExportFormat::Jsonl => {
            serde_jsonlines::write_json_lines(path, items)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(items.len())
}
