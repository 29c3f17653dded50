//! Lunch break tracking command.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct LunchArgs {
    #[command(subcommand)]
    action: LunchAction,
}

#[derive(Debug, Subcommand)]
enum LunchAction {
    /// Start a lunch break
    Start,
    /// Finish the lunch break
    End,
    /// Drop an in-progress lunch break without recording anything
    Abandon,
}

pub fn cmd(args: LunchArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        LunchAction::Start => {
            apply(logbook.start_lunch(now))?;
            msg_success!(Message::LunchStarted);
        }
        LunchAction::End => {
            let summary = apply(logbook.end_lunch(now))?;
            msg_success!(Message::LunchFinished {
                minutes: summary.duration_minutes,
                total: summary.total_minutes,
            });
        }
        LunchAction::Abandon => {
            logbook.abandon_lunch();
            msg_info!(Message::LunchAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
