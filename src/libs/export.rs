//! History export for external analysis and backup.
//!
//! CSV flattens each operation into one row; JSON dumps the full aggregates
//! as stored (camelCase document shape), suitable for backup and restore.

use crate::libs::operation::Operation;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// One flattened history row for the CSV export.
#[derive(Debug, Serialize)]
struct ExportRow {
    id: String,
    start_time: String,
    end_time: String,
    r#type: String,
    city: String,
    well_service: String,
    operator: String,
    origin: String,
    destination: String,
    distance_km: Option<f64>,
    mobilization_minutes: Option<f64>,
    demobilization_minutes: Option<f64>,
    waiting_periods: usize,
    total_waiting_minutes: Option<f64>,
    lunch_breaks: usize,
    total_lunch_minutes: Option<f64>,
    refuelings: usize,
    total_refueling_minutes: Option<f64>,
}

impl ExportRow {
    fn from_operation(op: &Operation) -> Self {
        let stamp = |ts: Option<NaiveDateTime>| ts.map_or_else(String::new, |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
        ExportRow {
            id: op.id.clone(),
            start_time: stamp(op.start_time),
            end_time: stamp(op.end_time),
            r#type: op.op_type.clone(),
            city: op.city.clone(),
            well_service: op.well_service.clone(),
            operator: op.operator.clone(),
            origin: op.origin.clone(),
            destination: op.destination.clone(),
            distance_km: op.distance_km,
            mobilization_minutes: op.mobilization.duration_minutes,
            demobilization_minutes: op.demobilization.duration_minutes,
            waiting_periods: op.waiting_periods.len(),
            total_waiting_minutes: op.total_waiting_time,
            lunch_breaks: op.lunch_breaks.len(),
            total_lunch_minutes: op.total_lunch_time,
            refuelings: op.refuelings.len(),
            total_refueling_minutes: op.total_refueling_time,
        }
    }
}

/// Writes the export and returns the path it landed on.
pub fn export(
    operations: &[Operation],
    format: ExportFormat,
    output: Option<PathBuf>,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| default_file_name(format, now));
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(&path)?;
            for operation in operations {
                writer.serialize(ExportRow::from_operation(operation))?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let mut file = File::create(&path)?;
            let raw = serde_json::to_string_pretty(operations)?;
            file.write_all(raw.as_bytes())?;
        }
    }
    Ok(path)
}

fn default_file_name(format: ExportFormat, now: NaiveDateTime) -> PathBuf {
    let extension = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    PathBuf::from(format!("operations_{}.{}", now.format("%Y%m%d_%H%M%S"), extension))
}
