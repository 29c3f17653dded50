//! Mobilization tracking command.
//!
//! Mobilization can only start after the displacement is completed; the
//! closed interval is frozen into the operation when it is saved.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MobilizationArgs {
    #[command(subcommand)]
    action: MobilizationAction,
}

#[derive(Debug, Subcommand)]
enum MobilizationAction {
    /// Start mobilization (requires a completed displacement)
    Start,
    /// Finish mobilization
    End,
    /// Drop an in-progress mobilization without recording anything
    Abandon,
}

pub fn cmd(args: MobilizationArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        MobilizationAction::Start => {
            apply(logbook.start_mobilization(now))?;
            msg_success!(Message::MobilizationStarted);
        }
        MobilizationAction::End => {
            let minutes = apply(logbook.end_mobilization(now))?;
            msg_success!(Message::MobilizationFinished(minutes));
        }
        MobilizationAction::Abandon => {
            logbook.abandon_mobilization();
            msg_info!(Message::MobilizationAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
