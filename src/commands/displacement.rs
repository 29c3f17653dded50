//! Displacement (travel) tracking command.
//!
//! `opslog displacement start` opens the trip with origin, destination and
//! the odometer reading; `end` closes it with the final reading and stores
//! the snapshot later frozen into the saved operation.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::store;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct DisplacementArgs {
    #[command(subcommand)]
    action: DisplacementAction,
}

#[derive(Debug, Subcommand)]
enum DisplacementAction {
    /// Start a displacement towards the work site
    Start {
        /// Where the trip starts
        #[arg(long)]
        origin: String,
        /// Where the trip is headed
        #[arg(long)]
        destination: String,
        /// Odometer reading at departure
        #[arg(long = "start-km")]
        start_km: String,
    },
    /// Finish the displacement with the final odometer reading
    End {
        /// Odometer reading at arrival
        #[arg(long = "end-km")]
        end_km: String,
    },
    /// Drop an in-progress displacement without recording anything
    Abandon,
}

pub fn cmd(args: DisplacementArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        DisplacementAction::Start {
            origin,
            destination,
            start_km,
        } => {
            apply(logbook.start_displacement(&origin, &destination, &start_km, now))?;
            msg_success!(Message::DisplacementStarted);
        }
        DisplacementAction::End { end_km } => {
            let summary = apply(logbook.end_displacement(&end_km, now))?;
            // The completed trip also lives in its own record, surviving the
            // session reset at the end of the cycle.
            if let Err(err) = store::displacement::save_last(&logbook.session().displacement) {
                msg_warning!(Message::PersistFailed(err.to_string()));
            }
            msg_success!(Message::DisplacementFinished {
                distance_km: summary.distance_km,
                minutes: summary.duration_minutes,
            });
        }
        DisplacementAction::Abandon => {
            logbook.abandon_displacement();
            msg_info!(Message::DisplacementAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
