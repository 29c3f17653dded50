//! Terminal table views for history and session status.

use crate::libs::formatter::{format_minutes, format_opt_minutes};
use crate::libs::interval::TimeInterval;
use crate::libs::operation::Operation;
use crate::store::session::Session;
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn history(operations: &[Operation]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "START", "TYPE", "CITY", "WELL/SERVICE", "WAIT", "LUNCH", "REFUEL", "MOB+DEMOB"]);
        for (index, op) in operations.iter().enumerate() {
            table.add_row(row![
                index + 1,
                op.id,
                op.start_time.map_or_else(|| "-".to_string(), |ts| ts.format("%d/%m %H:%M").to_string()),
                op.op_type,
                op.city,
                op.well_service,
                format_opt_minutes(op.total_waiting_time),
                format_opt_minutes(op.total_lunch_time),
                format_opt_minutes(op.total_refueling_time),
                format_opt_minutes(op.total_operation_minutes()),
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn status(session: &Session, current: Option<&Operation>, now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PHASE", "STATE", "STARTED", "ELAPSED"]);
        Self::phase_row(&mut table, "Displacement", &session.displacement.interval, now);
        Self::phase_row(&mut table, "Mobilization", &session.mobilization, now);
        Self::phase_row(&mut table, "Demobilization", &session.demobilization, now);
        Self::phase_row(&mut table, "Waiting", &session.waiting.interval, now);
        Self::phase_row(&mut table, "Lunch", &session.lunch.interval, now);
        Self::phase_row(&mut table, "Refueling", &session.refueling.interval, now);
        table.printstd();

        match current {
            Some(op) => println!(
                "Current operation: {} ({} - {})",
                op.id,
                if op.op_type.is_empty() { "-" } else { &op.op_type },
                if op.city.is_empty() { "-" } else { &op.city }
            ),
            None => println!("Current operation: none (draft {})", if session.draft_started_at.is_some() { "open" } else { "not started" }),
        }

        Ok(())
    }

    fn phase_row(table: &mut Table, name: &str, interval: &TimeInterval, now: NaiveDateTime) {
        let state = if interval.is_active() {
            "active"
        } else if interval.is_closed() {
            "closed"
        } else {
            "idle"
        };
        let started = interval
            .start
            .map_or_else(|| "-".to_string(), |ts| ts.format("%H:%M:%S").to_string());
        let elapsed = match interval.elapsed_minutes(now) {
            Some(minutes) => format_minutes(minutes),
            None => format_opt_minutes(interval.duration_minutes),
        };
        table.add_row(row![name, state, started, elapsed]);
    }
}
