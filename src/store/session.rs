//! The operator's session: the open draft and every phase tracker.
//!
//! CLI invocations are discrete, so the session lives in its own JSON
//! document next to the history and is reloaded by every command. A missing
//! file is a fresh session.

use crate::libs::data_storage::DataStorage;
use crate::libs::displacement::DisplacementTracker;
use crate::libs::interval::TimeInterval;
use crate::libs::subevents::{LunchTracker, RefuelingTracker, WaitingTracker};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;

pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub displacement: DisplacementTracker,
    #[serde(default)]
    pub mobilization: TimeInterval,
    #[serde(default)]
    pub demobilization: TimeInterval,
    #[serde(default)]
    pub waiting: WaitingTracker,
    #[serde(default)]
    pub lunch: LunchTracker,
    #[serde(default)]
    pub refueling: RefuelingTracker,

    /// Start stamp of the open draft, set by `operation start`.
    #[serde(default)]
    pub draft_started_at: Option<NaiveDateTime>,
    /// True between a successful save and the demobilization close.
    #[serde(default)]
    pub operation_saved: bool,
    /// Explicit reference to the aggregate sub-events attach to.
    #[serde(default)]
    pub current_operation_id: Option<String>,
}

impl Session {
    pub fn load() -> Result<Self> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        if !path.exists() {
            return Ok(Session::default());
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let session = serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
