//! Displacement (travel) tracking between the base and the work site.
//!
//! A displacement opens with origin, destination and the odometer reading,
//! and closes with the final odometer reading. The driven distance must be
//! non-negative; a regression is rejected and the displacement stays open so
//! the operator can correct the reading. The closed tracker doubles as the
//! snapshot frozen into the operation aggregate at save time, and is also
//! persisted on its own as the "last displacement" record.

use crate::libs::error::{LogbookError, Phase};
use crate::libs::interval::TimeInterval;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplacementTracker {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// Odometer readings are kept as entered; parsing happens at the
    /// transition, where a bad value can still be rejected.
    #[serde(default)]
    pub start_km: String,
    #[serde(default)]
    pub end_km: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub interval: TimeInterval,
}

/// What `end` reports back to the caller for the success notice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementSummary {
    pub distance_km: f64,
    pub duration_minutes: f64,
}

impl DisplacementTracker {
    /// Opens a displacement. Origin, destination and the starting odometer
    /// reading are all required.
    pub fn start(
        &mut self,
        origin: &str,
        destination: &str,
        start_km: &str,
        now: chrono::NaiveDateTime,
    ) -> Result<(), LogbookError> {
        if self.interval.is_active() {
            return Err(LogbookError::AlreadyInProgress(Phase::Displacement));
        }
        if origin.trim().is_empty() {
            return Err(LogbookError::MissingField("origin"));
        }
        if destination.trim().is_empty() {
            return Err(LogbookError::MissingField("destination"));
        }
        if start_km.trim().is_empty() {
            return Err(LogbookError::MissingField("start km"));
        }
        parse_km("start km", start_km)?;

        // A completed displacement is replaced by a fresh one; only an
        // in-progress displacement blocks restarting.
        *self = DisplacementTracker {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            start_km: start_km.trim().to_string(),
            ..DisplacementTracker::default()
        };
        self.interval.begin(Phase::Displacement, now)?;
        Ok(())
    }

    /// Closes the displacement with the final odometer reading.
    ///
    /// A distance below zero is a validation error: the interval stays open
    /// and nothing is stored.
    pub fn end(&mut self, end_km: &str, now: chrono::NaiveDateTime) -> Result<DisplacementSummary, LogbookError> {
        if !self.interval.is_active() {
            return Err(LogbookError::NotStarted(Phase::Displacement));
        }
        if end_km.trim().is_empty() {
            return Err(LogbookError::MissingField("end km"));
        }

        let start = parse_km("start km", &self.start_km)?;
        let end = parse_km("end km", end_km)?;
        let distance = end - start;
        if distance < 0.0 {
            return Err(LogbookError::KmRegression { start, end });
        }

        let duration = self.interval.close(Phase::Displacement, now)?;
        self.end_km = end_km.trim().to_string();
        self.distance_km = Some(distance);
        Ok(DisplacementSummary {
            distance_km: distance,
            duration_minutes: duration,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.interval.is_closed()
    }

    /// Abandons an in-progress displacement without recording anything.
    pub fn abandon(&mut self) {
        *self = DisplacementTracker::default();
    }
}

fn parse_km(field: &'static str, value: &str) -> Result<f64, LogbookError> {
    value.trim().parse::<f64>().map_err(|_| LogbookError::InvalidNumber {
        field,
        value: value.trim().to_string(),
    })
}
