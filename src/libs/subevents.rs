//! Sub-events recorded inside an operation: waiting periods, lunch breaks
//! and refuelings.
//!
//! The three trackers are independent of each other; nothing stops a lunch
//! break from overlapping a waiting period. Each closed sub-event is
//! immutable, appended to the owning operation's list, and added to that
//! operation's running total.

use crate::libs::error::{LogbookError, Phase};
use crate::libs::interval::{lenient_minutes, TimeInterval};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reason entry of a waiting period, stamped when it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingReason {
    pub timestamp: NaiveDateTime,
    pub reason: String,
}

/// A closed waiting period with the reasons recorded while it was open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingPeriod {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<WaitingReason>,
}

/// A closed lunch break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchBreak {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<f64>,
}

/// What went into the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum FuelType {
    /// Water for the tank truck.
    #[serde(rename = "Água", alias = "água", alias = "agua")]
    #[value(name = "water", alias = "agua")]
    Water,
    /// Diesel/fuel for the unit.
    #[serde(rename = "Combustível", alias = "combustível", alias = "combustivel")]
    #[value(name = "fuel", alias = "combustivel")]
    Fuel,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Report labels keep the product's Portuguese wording.
        match self {
            FuelType::Water => write!(f, "Água"),
            FuelType::Fuel => write!(f, "Combustível"),
        }
    }
}

/// A closed refueling event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefuelingEvent {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<f64>,
    #[serde(rename = "type")]
    pub fuel_type: FuelType,
}

/// In-progress waiting period: an interval plus the accumulated reasons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingTracker {
    #[serde(default)]
    pub interval: TimeInterval,
    #[serde(default)]
    pub reasons: Vec<WaitingReason>,
}

impl WaitingTracker {
    /// Starts a waiting period. A non-empty reason is required.
    pub fn start(&mut self, reason: &str, now: NaiveDateTime) -> Result<(), LogbookError> {
        if self.interval.is_active() {
            return Err(LogbookError::AlreadyInProgress(Phase::Waiting));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LogbookError::MissingField("reason"));
        }

        *self = WaitingTracker::default();
        self.interval.begin(Phase::Waiting, now)?;
        self.reasons.push(WaitingReason {
            timestamp: now,
            reason: reason.to_string(),
        });
        Ok(())
    }

    /// Appends another reason while the period is open.
    pub fn add_reason(&mut self, reason: &str, now: NaiveDateTime) -> Result<(), LogbookError> {
        if !self.interval.is_active() {
            return Err(LogbookError::NotStarted(Phase::Waiting));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LogbookError::MissingField("reason"));
        }
        self.reasons.push(WaitingReason {
            timestamp: now,
            reason: reason.to_string(),
        });
        Ok(())
    }

    /// Closes the period and hands back the immutable record.
    pub fn end(&mut self, now: NaiveDateTime) -> Result<WaitingPeriod, LogbookError> {
        let start = self.interval.start.ok_or(LogbookError::NotStarted(Phase::Waiting))?;
        let duration = self.interval.close(Phase::Waiting, now)?;
        let period = WaitingPeriod {
            start_time: start,
            end_time: now,
            duration: Some(duration),
            reasons: std::mem::take(&mut self.reasons),
        };
        self.interval.reset();
        Ok(period)
    }

    pub fn abandon(&mut self) {
        *self = WaitingTracker::default();
    }
}

/// In-progress lunch break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchTracker {
    #[serde(default)]
    pub interval: TimeInterval,
}

impl LunchTracker {
    pub fn start(&mut self, now: NaiveDateTime) -> Result<(), LogbookError> {
        if self.interval.is_active() {
            return Err(LogbookError::AlreadyInProgress(Phase::Lunch));
        }
        self.interval.reset();
        self.interval.begin(Phase::Lunch, now)
    }

    pub fn end(&mut self, now: NaiveDateTime) -> Result<LunchBreak, LogbookError> {
        let start = self.interval.start.ok_or(LogbookError::NotStarted(Phase::Lunch))?;
        let duration = self.interval.close(Phase::Lunch, now)?;
        self.interval.reset();
        Ok(LunchBreak {
            start_time: start,
            end_time: now,
            duration: Some(duration),
        })
    }

    pub fn abandon(&mut self) {
        self.interval.reset();
    }
}

/// In-progress refueling with its selected fuel type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefuelingTracker {
    #[serde(default)]
    pub interval: TimeInterval,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
}

impl RefuelingTracker {
    pub fn start(&mut self, fuel_type: FuelType, now: NaiveDateTime) -> Result<(), LogbookError> {
        if self.interval.is_active() {
            return Err(LogbookError::AlreadyInProgress(Phase::Refueling));
        }
        self.interval.reset();
        self.interval.begin(Phase::Refueling, now)?;
        self.fuel_type = Some(fuel_type);
        Ok(())
    }

    pub fn end(&mut self, now: NaiveDateTime) -> Result<RefuelingEvent, LogbookError> {
        let start = self.interval.start.ok_or(LogbookError::NotStarted(Phase::Refueling))?;
        let fuel_type = self.fuel_type.ok_or(LogbookError::NotStarted(Phase::Refueling))?;
        let duration = self.interval.close(Phase::Refueling, now)?;
        self.interval.reset();
        self.fuel_type = None;
        Ok(RefuelingEvent {
            start_time: start,
            end_time: now,
            duration: Some(duration),
            fuel_type,
        })
    }

    pub fn abandon(&mut self) {
        *self = RefuelingTracker::default();
    }
}
