//! Demobilization tracking command.
//!
//! Demobilization requires a saved operation. Closing it writes the
//! interval onto the current aggregate, enqueues the finished operation for
//! the remote mirror and resets the session for the next cycle.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::store::queue::SyncQueue;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct DemobilizationArgs {
    #[command(subcommand)]
    action: DemobilizationAction,
}

#[derive(Debug, Subcommand)]
enum DemobilizationAction {
    /// Start demobilization (requires a saved operation)
    Start,
    /// Finish demobilization and close the operating cycle
    End,
    /// Drop an in-progress demobilization without recording anything
    Abandon,
}

pub fn cmd(args: DemobilizationArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        DemobilizationAction::Start => {
            apply(logbook.start_demobilization(now))?;
            msg_success!(Message::DemobilizationStarted);
        }
        DemobilizationAction::End => {
            let close = apply(logbook.end_demobilization(now))?;
            msg_success!(Message::DemobilizationFinished(close.duration_minutes));
            if let Some(total) = close.total_minutes {
                msg_info!(Message::TotalOperationTime(total));
            }

            // The finished aggregate goes to the outbound queue; an enqueue
            // failure never blocks closing the cycle.
            match SyncQueue::load() {
                Ok(mut queue) => {
                    queue.push(close.operation);
                    if let Err(err) = queue.save() {
                        msg_warning!(Message::PersistFailed(err.to_string()));
                    }
                }
                Err(err) => msg_warning!(Message::PersistFailed(err.to_string())),
            }
        }
        DemobilizationAction::Abandon => {
            logbook.abandon_demobilization();
            msg_info!(Message::DemobilizationAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
