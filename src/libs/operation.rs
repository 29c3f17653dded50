//! The operation aggregate: one full field job cycle.
//!
//! An operation is created as a draft, saved into the history once its
//! required fields are filled, and then becomes the mutation target for
//! sub-events and demobilization until the cycle closes. Persisted field
//! names keep the camelCase wire shape of the historical mobile documents.

use crate::libs::displacement::DisplacementTracker;
use crate::libs::error::LogbookError;
use crate::libs::interval::{lenient_minutes, TimeInterval};
use crate::libs::subevents::{LunchBreak, RefuelingEvent, WaitingPeriod};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Editable fields collected for an operation save.
#[derive(Debug, Clone, Default)]
pub struct OperationInput {
    pub op_type: String,
    pub city: String,
    pub well_service: String,
    pub operator: String,
    pub volume: String,
    pub temperature: String,
    pub pressure: String,
    pub activities: String,
}

impl OperationInput {
    /// The four required fields; any empty one rejects the save.
    pub fn validate(&self) -> Result<(), LogbookError> {
        if self.op_type.trim().is_empty() {
            return Err(LogbookError::MissingField("type"));
        }
        if self.city.trim().is_empty() {
            return Err(LogbookError::MissingField("city"));
        }
        if self.well_service.trim().is_empty() {
            return Err(LogbookError::MissingField("well/service"));
        }
        if self.operator.trim().is_empty() {
            return Err(LogbookError::MissingField("operator"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Derived from the creation timestamp (epoch milliseconds) and
    /// re-derived at load when absent or corrupted; never empty.
    pub id: String,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,

    #[serde(rename = "type", default)]
    pub op_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub well_service: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub pressure: String,
    #[serde(default)]
    pub activities: String,

    // Displacement snapshot frozen at save time.
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start_km: String,
    #[serde(default)]
    pub end_km: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub displacement: TimeInterval,

    #[serde(default)]
    pub mobilization: TimeInterval,
    #[serde(default)]
    pub demobilization: TimeInterval,

    #[serde(default)]
    pub waiting_periods: Vec<WaitingPeriod>,
    #[serde(default)]
    pub lunch_breaks: Vec<LunchBreak>,
    #[serde(default)]
    pub refuelings: Vec<RefuelingEvent>,

    // Running totals in minutes, bumped additively at append time. They stay
    // null until the first sub-event of that kind closes.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_waiting_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_lunch_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_refueling_time: Option<f64>,
}

impl Operation {
    /// Builds the frozen aggregate appended to the history at save time.
    pub fn from_save(
        input: &OperationInput,
        displacement: &DisplacementTracker,
        mobilization: &TimeInterval,
        start_time: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Self {
        Operation {
            id: Self::derive_id(now),
            start_time: Some(start_time),
            end_time: Some(now),
            op_type: input.op_type.trim().to_string(),
            city: input.city.trim().to_string(),
            well_service: input.well_service.trim().to_string(),
            operator: input.operator.trim().to_string(),
            volume: input.volume.trim().to_string(),
            temperature: input.temperature.trim().to_string(),
            pressure: input.pressure.trim().to_string(),
            activities: input.activities.trim().to_string(),
            origin: displacement.origin.clone(),
            destination: displacement.destination.clone(),
            start_km: displacement.start_km.clone(),
            end_km: displacement.end_km.clone(),
            distance_km: displacement.distance_km,
            displacement: displacement.interval.clone(),
            mobilization: mobilization.clone(),
            demobilization: TimeInterval::default(),
            waiting_periods: Vec::new(),
            lunch_breaks: Vec::new(),
            refuelings: Vec::new(),
            total_waiting_time: None,
            total_lunch_time: None,
            total_refueling_time: None,
        }
    }

    /// Creation-timestamp identity, matching the historical documents.
    pub fn derive_id(now: NaiveDateTime) -> String {
        now.and_utc().timestamp_millis().to_string()
    }

    pub fn append_waiting(&mut self, period: WaitingPeriod) {
        let duration = period.duration.unwrap_or(0.0);
        self.waiting_periods.push(period);
        self.total_waiting_time = Some(self.total_waiting_time.unwrap_or(0.0) + duration);
    }

    pub fn append_lunch(&mut self, lunch: LunchBreak) {
        let duration = lunch.duration.unwrap_or(0.0);
        self.lunch_breaks.push(lunch);
        self.total_lunch_time = Some(self.total_lunch_time.unwrap_or(0.0) + duration);
    }

    pub fn append_refueling(&mut self, refueling: RefuelingEvent) {
        let duration = refueling.duration.unwrap_or(0.0);
        self.refuelings.push(refueling);
        self.total_refueling_time = Some(self.total_refueling_time.unwrap_or(0.0) + duration);
    }

    /// Mobilization plus demobilization, defined only when both phases are
    /// closed. "Not applicable" is `None`, never zero.
    pub fn total_operation_minutes(&self) -> Option<f64> {
        match (self.mobilization.duration_minutes, self.demobilization.duration_minutes) {
            (Some(mob), Some(demob)) => Some(mob + demob),
            _ => None,
        }
    }
}
