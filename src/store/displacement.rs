//! The "last displacement" record.
//!
//! The most recent completed displacement is kept in its own document so it
//! survives a cleared session and can be inspected after the cycle ends.

use crate::libs::data_storage::DataStorage;
use crate::libs::displacement::DisplacementTracker;
use anyhow::{Context, Result};
use std::fs;

pub const LAST_DISPLACEMENT_FILE_NAME: &str = "last_displacement.json";

pub fn save_last(displacement: &DisplacementTracker) -> Result<()> {
    let path = DataStorage::new().get_path(LAST_DISPLACEMENT_FILE_NAME)?;
    let raw = serde_json::to_string_pretty(displacement)?;
    fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn load_last() -> Result<Option<DisplacementTracker>> {
    let path = DataStorage::new().get_path(LAST_DISPLACEMENT_FILE_NAME)?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&raw).ok())
}
