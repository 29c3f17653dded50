//! Waiting period tracking command.
//!
//! A waiting period needs a reason when it starts; further reasons can be
//! noted while it runs. Closing it appends the period to the current
//! operation and bumps its waiting total.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct WaitingArgs {
    #[command(subcommand)]
    action: WaitingAction,
}

#[derive(Debug, Subcommand)]
enum WaitingAction {
    /// Start a waiting period (a reason is required)
    Start {
        /// Why the crew is waiting
        #[arg(long)]
        reason: String,
    },
    /// Record an additional reason while waiting
    Note {
        #[arg(long)]
        reason: String,
    },
    /// Finish the waiting period
    End,
    /// Drop an in-progress waiting period without recording anything
    Abandon,
}

pub fn cmd(args: WaitingArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        WaitingAction::Start { reason } => {
            apply(logbook.start_waiting(&reason, now))?;
            msg_success!(Message::WaitingStarted);
        }
        WaitingAction::Note { reason } => {
            apply(logbook.add_waiting_reason(&reason, now))?;
            msg_success!(Message::WaitingReasonAdded);
        }
        WaitingAction::End => {
            let summary = apply(logbook.end_waiting(now))?;
            msg_success!(Message::WaitingFinished {
                minutes: summary.duration_minutes,
                total: summary.total_minutes,
            });
        }
        WaitingAction::Abandon => {
            logbook.abandon_waiting();
            msg_info!(Message::WaitingAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
