//! History export command.

use crate::commands::load_logbook;
use crate::libs::export::{export, ExportFormat};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format
    #[arg(long, short, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Where to write the export (defaults to a timestamped file name)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let logbook = load_logbook()?;
    if logbook.history().is_empty() {
        msg_info!(Message::HistoryEmpty);
        return Ok(());
    }

    let now = Local::now().naive_local();
    let path = export(logbook.history().operations(), args.format, args.output, now)?;
    msg_success!(Message::ExportSaved(path.display().to_string()));
    Ok(())
}
