//! Operation record command: start the draft, save it into the history, or
//! abandon it.

use crate::commands::{apply, load_logbook, persist_or_warn};
use crate::libs::messages::Message;
use crate::libs::operation::OperationInput;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct OperationArgs {
    #[command(subcommand)]
    action: OperationAction,
}

#[derive(Debug, Subcommand)]
enum OperationAction {
    /// Open a new operation draft
    Start,
    /// Validate the draft and append it to the history
    Save {
        /// Operation type (required)
        #[arg(long = "type")]
        op_type: String,
        /// City of the work site (required)
        #[arg(long)]
        city: String,
        /// Well or service name (required)
        #[arg(long = "well-service")]
        well_service: String,
        /// Company representative (required)
        #[arg(long)]
        operator: String,
        /// Volume in bbl
        #[arg(long, default_value = "")]
        volume: String,
        /// Temperature in °C
        #[arg(long, default_value = "")]
        temperature: String,
        /// Pressure in PSI
        #[arg(long, default_value = "")]
        pressure: String,
        /// Free-form description of the activities performed
        #[arg(long, default_value = "")]
        activities: String,
    },
    /// Drop the open draft without saving it
    Abandon,
}

pub fn cmd(args: OperationArgs) -> Result<()> {
    let mut logbook = load_logbook()?;
    let now = Local::now().naive_local();

    match args.action {
        OperationAction::Start => {
            let previous_open = apply(logbook.start_operation(now))?;
            if previous_open {
                msg_warning!(Message::PreviousOperationStillOpen);
            }
            msg_success!(Message::OperationStarted);
        }
        OperationAction::Save {
            op_type,
            city,
            well_service,
            operator,
            volume,
            temperature,
            pressure,
            activities,
        } => {
            let input = OperationInput {
                op_type,
                city,
                well_service,
                operator,
                volume,
                temperature,
                pressure,
                activities,
            };
            let id = apply(logbook.save_operation(&input, now))?.id.clone();
            msg_success!(Message::OperationSaved(id));
        }
        OperationAction::Abandon => {
            logbook.abandon_operation_draft();
            msg_info!(Message::OperationDraftAbandoned);
        }
    }

    persist_or_warn(&logbook);
    Ok(())
}
