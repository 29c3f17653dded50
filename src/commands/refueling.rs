//! Refueling tracking command.
//!
//! A refueling starts with a fuel type selection (water or fuel) and closes
//! onto the current operation like the other sub-events.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::libs::subevents::FuelType;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RefuelingArgs {
    #[command(subcommand)]
    action: RefuelingAction,
}

#[derive(Debug, Subcommand)]
enum RefuelingAction {
    /// Start a refueling of the given type
    Start {
        /// What goes into the tank
        #[arg(long, value_enum)]
        fuel: FuelType,
    },
    /// Finish the refueling
    End,
    /// Drop an in-progress refueling without recording anything
    Abandon,
}

pub fn cmd(args: RefuelingArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        RefuelingAction::Start { fuel } => {
            apply(logbook.start_refueling(fuel, now))?;
            msg_success!(Message::RefuelingStarted(fuel.to_string()));
        }
        RefuelingAction::End => {
            let (fuel, summary) = apply(logbook.end_refueling(now))?;
            msg_success!(Message::RefuelingFinished {
                fuel: fuel.to_string(),
                minutes: summary.duration_minutes,
                total: summary.total_minutes,
            });
        }
        RefuelingAction::Abandon => {
            logbook.abandon_refueling();
            msg_info!(Message::RefuelingAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
