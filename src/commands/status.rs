//! Session status display.
//!
//! Shows every phase tracker with its state and the elapsed time so far.
//! `--watch` refreshes the view once per second, the CLI equivalent of the
//! live elapsed-time counter on the original phase screens; the
//! recomputation is read-only and never touches persisted state.

use crate::libs::logbook::Logbook;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::store;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Refresh the view every second until interrupted
    #[arg(long, short)]
    watch: bool,
}

pub async fn cmd(args: StatusArgs) -> Result<()> {
    if !args.watch {
        return render();
    }

    msg_info!(Message::WatchStopHint);
    loop {
        render()?;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

fn render() -> Result<()> {
    let logbook = Logbook::load()?;
    let now = Local::now().naive_local();

    msg_print!(Message::StatusTitle, true);
    View::status(logbook.session(), logbook.current_operation(), now)?;

    // The last completed trip is useful context once the session tracker
    // has been reset by a cycle close.
    if logbook.session().displacement.interval.is_idle() {
        if let Some(last) = store::displacement::load_last()? {
            if let Some(distance) = last.distance_km {
                println!("Last displacement: {} -> {} ({:.1} km)", last.origin, last.destination, distance);
            }
        }
    }
    Ok(())
}
