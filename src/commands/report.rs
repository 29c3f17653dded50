//! Operations report command.
//!
//! Renders the whole history as a formatted document. Plain text goes to
//! stdout unless an output path is given; HTML always lands in a file.

use crate::commands::load_logbook;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::report::{ReportFormat, ReportGenerator};
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Output flavor of the document
    #[arg(long, short, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Where to write the document
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let logbook = load_logbook()?;
    if logbook.history().is_empty() {
        msg_info!(Message::NoOperationsForReport);
        return Ok(());
    }

    let now = Local::now().naive_local();
    let profile = Config::read()?.profile.unwrap_or_default();
    let generator = ReportGenerator::new(profile, now);
    let document = generator.render(logbook.history().operations(), args.format);

    match (args.output, args.format) {
        (Some(path), _) => {
            fs::write(&path, document)?;
            msg_success!(Message::ReportSaved(path.display().to_string()));
        }
        (None, ReportFormat::Text) => print!("{}", document),
        (None, ReportFormat::Html) => {
            let path = PathBuf::from(format!("report_{}.html", now.format("%Y%m%d_%H%M%S")));
            fs::write(&path, document)?;
            msg_success!(Message::ReportSaved(path.display().to_string()));
        }
    }

    Ok(())
}
