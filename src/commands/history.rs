//! Operation history listing and clearing.

use crate::commands::{load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    action: Option<HistoryAction>,
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List all recorded operations (the default)
    List,
    /// Delete every recorded operation and reset the session
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn cmd(args: HistoryArgs) -> Result<()> {
    match args.action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => list(),
        HistoryAction::Clear { yes } => clear(yes),
    }
}

fn list() -> Result<()> {
    let logbook = load_logbook()?;
    if logbook.history().is_empty() {
        msg_info!(Message::HistoryEmpty);
        return Ok(());
    }

    msg_print!(Message::HistoryTitle(logbook.history().len()), true);
    View::history(logbook.history().operations())?;
    Ok(())
}

fn clear(yes: bool) -> Result<()> {
    let mut logbook = load_logbook()?;
    if logbook.history().is_empty() {
        msg_info!(Message::HistoryEmpty);
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmClearHistory(logbook.history().len()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::ClearCancelled);
        return Ok(());
    }

    logbook.clear_history();
    persist_or_warn(&logbook);
    msg_success!(Message::HistoryCleared);
    Ok(())
}
