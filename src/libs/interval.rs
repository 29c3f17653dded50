//! The start/end/duration primitive shared by every tracked phase.
//!
//! A `TimeInterval` is a small state machine: idle (no start), active
//! (started, not ended) and closed (both set). The duration is computed once
//! when the interval closes and cached; it never changes afterwards. Closing
//! with an end time earlier than the start is rejected and leaves the
//! interval active, so clock skew can never record a negative duration.

use crate::libs::error::{LogbookError, Phase};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds per minute; durations are kept in fractional minutes.
const MS_PER_MINUTE: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    Idle,
    Active,
    Closed,
}

/// One start/end timestamp pair with its cached duration in minutes.
///
/// Serialized with the persisted document's camelCase field names. The
/// duration deserializer is lenient: anything that is not a JSON number
/// becomes `None`, so a corrupted blob can never smuggle a non-numeric
/// placeholder into the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration_minutes: Option<f64>,
}

impl TimeInterval {
    pub fn state(&self) -> PhaseState {
        match (self.start, self.end) {
            (None, _) => PhaseState::Idle,
            (Some(_), None) => PhaseState::Active,
            (Some(_), Some(_)) => PhaseState::Closed,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == PhaseState::Idle
    }

    pub fn is_active(&self) -> bool {
        self.state() == PhaseState::Active
    }

    pub fn is_closed(&self) -> bool {
        self.state() == PhaseState::Closed
    }

    /// Opens the interval. Fails unless idle.
    pub fn begin(&mut self, phase: Phase, now: NaiveDateTime) -> Result<(), LogbookError> {
        match self.state() {
            PhaseState::Idle => {
                self.start = Some(now);
                Ok(())
            }
            PhaseState::Active => Err(LogbookError::AlreadyInProgress(phase)),
            PhaseState::Closed => Err(LogbookError::AlreadyCompleted(phase)),
        }
    }

    /// Closes the interval and caches the duration in fractional minutes.
    ///
    /// Rejects `now` earlier than the start and keeps the interval active in
    /// that case.
    pub fn close(&mut self, phase: Phase, now: NaiveDateTime) -> Result<f64, LogbookError> {
        let start = match self.state() {
            PhaseState::Active => self.start.ok_or(LogbookError::NotStarted(phase))?,
            PhaseState::Idle => return Err(LogbookError::NotStarted(phase)),
            PhaseState::Closed => return Err(LogbookError::AlreadyCompleted(phase)),
        };

        let millis = (now - start).num_milliseconds();
        if millis < 0 {
            return Err(LogbookError::EndBeforeStart);
        }

        let minutes = millis as f64 / MS_PER_MINUTE;
        self.end = Some(now);
        self.duration_minutes = Some(minutes);
        Ok(minutes)
    }

    /// Minutes elapsed since the start, for live status display only.
    /// Returns `None` unless the interval is active.
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> Option<f64> {
        match self.state() {
            PhaseState::Active => {
                let millis = (now - self.start?).num_milliseconds().max(0);
                Some(millis as f64 / MS_PER_MINUTE)
            }
            _ => None,
        }
    }

    /// Abandons whatever was recorded and returns to idle.
    pub fn reset(&mut self) {
        *self = TimeInterval::default();
    }
}

/// Accepts a non-negative JSON number for an optional duration; every other
/// shape (string, bool, object, null, missing, negative number) collapses to
/// `None`. Durations are never negative by contract.
pub fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|minutes| *minutes >= 0.0))
}
