//! The persisted operation history.
//!
//! The history is one ordered JSON document, rewritten in full on every
//! mutation. Version 1 wraps the operations in a `schemaVersion` envelope;
//! a bare array is recognized as the version-0 document written by the
//! original mobile app (flat camelCase fields, ISO-8601 timestamps) and is
//! migrated structurally in one pass at load time.
//!
//! Migration guarantees on the in-memory model:
//! - every optional duration is a non-negative number or null, never a
//!   non-numeric placeholder;
//! - every id is a non-empty string, re-derived from the operation's start
//!   time when missing;
//! - null or non-object entries are dropped from the view. The stored blob
//!   keeps them until the next save unless `rewrite_on_load` is set.

use crate::libs::data_storage::DataStorage;
use crate::libs::interval::TimeInterval;
use crate::libs::operation::Operation;
use crate::libs::subevents::{FuelType, LunchBreak, RefuelingEvent, WaitingPeriod, WaitingReason};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub const HISTORY_FILE_NAME: &str = "history.json";

const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryDocument<'a> {
    schema_version: u32,
    operations: &'a [Operation],
}

/// In-memory view of the history document.
pub struct HistoryStore {
    path: PathBuf,
    operations: Vec<Operation>,
    dropped_on_load: usize,
}

impl HistoryStore {
    /// Loads and normalizes the history document, creating an empty store
    /// when none exists yet.
    pub fn load() -> Result<Self> {
        let path = DataStorage::new().get_path(HISTORY_FILE_NAME)?;
        if !path.exists() {
            return Ok(HistoryStore {
                path,
                operations: Vec::new(),
                dropped_on_load: 0,
            });
        }

        let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let (operations, dropped) = parse_document(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(HistoryStore {
            path,
            operations,
            dropped_on_load: dropped,
        })
    }

    /// Rewrites the whole document under the current schema version.
    pub fn save(&self) -> Result<()> {
        let document = HistoryDocument {
            schema_version: SCHEMA_VERSION,
            operations: &self.operations,
        };
        let raw = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, raw).with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Corrupted entries skipped by the load-time migration.
    pub fn dropped_on_load(&self) -> usize {
        self.dropped_on_load
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn last(&self) -> Option<&Operation> {
        self.operations.last()
    }

    /// Resolves the mutation target by id. The current operation is always
    /// addressed this way rather than as "the last element".
    pub fn operation_mut(&mut self, id: &str) -> Option<&mut Operation> {
        self.operations.iter_mut().find(|op| op.id == id)
    }

    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Drops every recorded operation. The only deletion path: individual
    /// aggregates are never removed.
    pub fn clear(&mut self) {
        self.operations.clear();
        self.dropped_on_load = 0;
    }
}

/// Parses either the current envelope or the legacy bare array.
fn parse_document(raw: &str) -> Result<(Vec<Operation>, usize)> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Object(map) => {
            let items = match map.get("operations") {
                Some(Value::Array(items)) => items.clone(),
                _ => bail!("history document has no operations array"),
            };
            Ok(collect_items(items, normalize_current))
        }
        Value::Array(items) => Ok(collect_items(items, migrate_legacy)),
        _ => bail!("history document is neither an envelope nor an array"),
    }
}

fn collect_items(items: Vec<Value>, convert: fn(Value) -> Option<Operation>) -> (Vec<Operation>, usize) {
    let total = items.len();
    let operations: Vec<Operation> = items.into_iter().filter_map(convert).collect();
    let dropped = total - operations.len();
    (operations, dropped)
}

/// Normalizes one already-versioned item. Non-objects are dropped; missing
/// fields default; a blank id is re-derived.
fn normalize_current(value: Value) -> Option<Operation> {
    if !value.is_object() {
        return None;
    }
    let mut operation: Operation = serde_json::from_value(value).ok()?;
    ensure_id(&mut operation);
    Some(operation)
}

/// Structural migration of one version-0 item (the React Native document
/// shape): flat `mobilizationStartTime`-style fields become nested
/// intervals, ISO-8601 timestamps become naive local timestamps, and every
/// optional duration collapses to number-or-null.
fn migrate_legacy(value: Value) -> Option<Operation> {
    let obj = value.as_object()?.clone();

    let str_field = |key: &str| -> String { obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string() };

    let mut operation = Operation {
        id: str_field("id"),
        start_time: obj.get("startTime").and_then(parse_legacy_ts),
        end_time: obj.get("endTime").and_then(parse_legacy_ts),
        op_type: str_field("type"),
        city: str_field("city"),
        well_service: str_field("wellService"),
        operator: str_field("operator"),
        volume: str_field("volume"),
        temperature: str_field("temperature"),
        pressure: str_field("pressure"),
        activities: str_field("activities"),
        origin: str_field("origin"),
        destination: str_field("destination"),
        start_km: str_field("startKm"),
        end_km: str_field("endKm"),
        distance_km: obj.get("distanceKm").and_then(duration_of),
        displacement: TimeInterval::default(),
        mobilization: legacy_interval(&obj, "mobilization"),
        demobilization: legacy_interval(&obj, "demobilization"),
        waiting_periods: legacy_waiting_periods(obj.get("waitingPeriods")),
        lunch_breaks: legacy_lunch_breaks(obj.get("lunchBreaks")),
        refuelings: legacy_refuelings(obj.get("refuelings")),
        total_waiting_time: obj.get("totalWaitingTime").and_then(duration_of),
        total_lunch_time: obj.get("totalLunchTime").and_then(duration_of),
        total_refueling_time: obj.get("totalRefuelingTime").and_then(duration_of),
    };
    ensure_id(&mut operation);
    Some(operation)
}

fn ensure_id(operation: &mut Operation) {
    if operation.id.trim().is_empty() {
        let seed = operation
            .start_time
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        operation.id = Operation::derive_id(seed);
    }
}

/// Reads the flat `<prefix>StartTime`/`<prefix>EndTime`/`<prefix>Duration`
/// triple of the legacy shape into one interval.
fn legacy_interval(obj: &serde_json::Map<String, Value>, prefix: &str) -> TimeInterval {
    TimeInterval {
        start: obj.get(&format!("{prefix}StartTime")).and_then(parse_legacy_ts),
        end: obj.get(&format!("{prefix}EndTime")).and_then(parse_legacy_ts),
        duration_minutes: obj.get(&format!("{prefix}Duration")).and_then(duration_of),
    }
}

fn legacy_waiting_periods(value: Option<&Value>) -> Vec<WaitingPeriod> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            Some(WaitingPeriod {
                start_time: obj.get("startTime").and_then(parse_legacy_ts)?,
                end_time: obj.get("endTime").and_then(parse_legacy_ts)?,
                duration: obj.get("duration").and_then(duration_of),
                reasons: legacy_reasons(obj.get("reasons")),
            })
        })
        .collect()
}

fn legacy_reasons(value: Option<&Value>) -> Vec<WaitingReason> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            Some(WaitingReason {
                timestamp: obj.get("timestamp").and_then(parse_legacy_ts)?,
                reason: obj.get("reason").and_then(Value::as_str)?.to_string(),
            })
        })
        .collect()
}

fn legacy_lunch_breaks(value: Option<&Value>) -> Vec<LunchBreak> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            Some(LunchBreak {
                start_time: obj.get("startTime").and_then(parse_legacy_ts)?,
                end_time: obj.get("endTime").and_then(parse_legacy_ts)?,
                duration: obj.get("duration").and_then(duration_of),
            })
        })
        .collect()
}

fn legacy_refuelings(value: Option<&Value>) -> Vec<RefuelingEvent> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            Some(RefuelingEvent {
                start_time: obj.get("startTime").and_then(parse_legacy_ts)?,
                end_time: obj.get("endTime").and_then(parse_legacy_ts)?,
                duration: obj.get("duration").and_then(duration_of),
                fuel_type: legacy_fuel_type(obj.get("type"))?,
            })
        })
        .collect()
}

fn legacy_fuel_type(value: Option<&Value>) -> Option<FuelType> {
    match value.and_then(Value::as_str)?.to_lowercase().as_str() {
        "água" | "agua" | "water" => Some(FuelType::Water),
        "combustível" | "combustivel" | "fuel" => Some(FuelType::Fuel),
        _ => None,
    }
}

/// Number-or-null for legacy duration fields; non-numeric placeholders and
/// negatives collapse to null.
fn duration_of(value: &Value) -> Option<f64> {
    value.as_f64().filter(|minutes| *minutes >= 0.0)
}

/// The mobile app wrote `Date.toISOString()` (UTC, trailing `Z`); newer
/// tooling may write naive timestamps. Accept both.
fn parse_legacy_ts(value: &Value) -> Option<NaiveDateTime> {
    let raw = value.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
}
