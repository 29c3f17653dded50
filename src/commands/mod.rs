pub mod demobilization;
pub mod displacement;
pub mod export;
pub mod history;
pub mod init;
pub mod lunch;
pub mod mobilization;
pub mod operation;
pub mod refueling;
pub mod report;
pub mod status;
pub mod sync;
pub mod waiting;

use crate::libs::config::Config;
use crate::libs::error::LogbookError;
use crate::libs::logbook::Logbook;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Track travel between base and work site")]
    Displacement(displacement::DisplacementArgs),
    #[command(about = "Track equipment mobilization")]
    Mobilization(mobilization::MobilizationArgs),
    #[command(about = "Start, save or abandon an operation record")]
    Operation(operation::OperationArgs),
    #[command(about = "Track equipment demobilization and close the cycle")]
    Demobilization(demobilization::DemobilizationArgs),
    #[command(about = "Track waiting periods with their reasons")]
    Waiting(waiting::WaitingArgs),
    #[command(about = "Track lunch breaks")]
    Lunch(lunch::LunchArgs),
    #[command(about = "Track water and fuel refuelings")]
    Refueling(refueling::RefuelingArgs),
    #[command(about = "Show the current session and elapsed times")]
    Status(status::StatusArgs),
    #[command(about = "List or clear the operation history")]
    History(history::HistoryArgs),
    #[command(about = "Generate an operations report")]
    Report(report::ReportArgs),
    #[command(about = "Export the history to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Push closed operations to the remote mirror")]
    Sync,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Displacement(args) => displacement::cmd(args),
            Commands::Mobilization(args) => mobilization::cmd(args),
            Commands::Operation(args) => operation::cmd(args),
            Commands::Demobilization(args) => demobilization::cmd(args),
            Commands::Waiting(args) => waiting::cmd(args),
            Commands::Lunch(args) => lunch::cmd(args),
            Commands::Refueling(args) => refueling::cmd(args),
            Commands::Status(args) => status::cmd(args).await,
            Commands::History(args) => history::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Sync => sync::cmd().await,
        }
    }
}

/// Loads the logbook and reports entries the load-time migration had to
/// drop. With `storage.rewrite_on_load` set, the repaired document is
/// written back immediately.
pub(crate) fn load_logbook() -> Result<Logbook> {
    let logbook = Logbook::load()?;
    let dropped = logbook.history().dropped_on_load();
    if dropped > 0 {
        msg_warning!(Message::HistoryEntriesDropped(dropped));
        let rewrite = Config::read()
            .ok()
            .and_then(|config| config.storage)
            .map(|storage| storage.rewrite_on_load)
            .unwrap_or(false);
        if rewrite {
            persist_or_warn(&logbook);
        }
    }
    Ok(logbook)
}

/// Turns a rejected lifecycle transition into a blocking console error.
pub(crate) fn apply<T>(result: Result<T, LogbookError>) -> Result<T> {
    result.map_err(|err| msg_error_anyhow!(Message::Custom(err.to_string())))
}

/// Persists after a successful transition. A failed write is only a
/// warning: the in-memory change stands and the operator keeps working.
pub(crate) fn persist_or_warn(logbook: &Logbook) {
    if let Err(err) = logbook.persist() {
        msg_warning!(Message::PersistFailed(err.to_string()));
    }
}
